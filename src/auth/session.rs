//! Server-side member sessions.
//!
//! A session is created on successful login and keyed by an opaque UUID
//! token sent to the browser in a cookie. It holds a snapshot of the
//! member record and expires after an idle period or a fixed lifetime.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::member::Member;

/// Session lookup errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Session has expired (idle or lifetime).
    #[error("session expired")]
    SessionExpired,

    /// No session with the given token.
    #[error("session not found")]
    SessionNotFound,
}

/// Absolute session lifetime (24 hours).
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 24 * 60 * 60;

/// Default idle timeout (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

/// An authenticated member session.
#[derive(Debug, Clone)]
pub struct MemberSession {
    /// Opaque session token.
    pub token: String,
    /// Member snapshot taken at login or last profile update.
    pub member: Member,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    last_activity: Instant,
}

impl MemberSession {
    /// Create a session for `member` with the default lifetime.
    pub fn new(member: Member) -> Self {
        Self::with_duration(member, Duration::from_secs(DEFAULT_SESSION_DURATION_SECS))
    }

    /// Create a session with a custom lifetime.
    pub fn with_duration(member: Member, duration: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(duration).unwrap_or_default();

        Self {
            token: Uuid::new_v4().to_string(),
            member,
            created_at: now,
            expires_at,
            last_activity: Instant::now(),
        }
    }

    /// Id of the logged-in member.
    pub fn member_id(&self) -> &str {
        &self.member.id
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    pub fn is_idle(&self, idle_timeout: Duration) -> bool {
        self.last_activity.elapsed() >= idle_timeout
    }

    /// Neither past its lifetime nor idle too long.
    pub fn is_valid(&self, idle_timeout: Duration) -> bool {
        !self.is_expired() && !self.is_idle(idle_timeout)
    }

    /// Record activity, resetting the idle timer.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// In-memory store of member sessions keyed by token.
#[derive(Debug)]
pub struct SessionManager {
    sessions: HashMap<String, MemberSession>,
    idle_timeout: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT_SECS)
    }

    pub fn with_idle_timeout(idle_timeout_secs: u64) -> Self {
        Self {
            sessions: HashMap::new(),
            idle_timeout: Duration::from_secs(idle_timeout_secs),
        }
    }

    /// Start a session for an authenticated member.
    pub fn create(&mut self, member: Member) -> MemberSession {
        let session = MemberSession::new(member);
        self.sessions.insert(session.token.clone(), session.clone());

        info!(member_id = %session.member.id, "Session created");
        session
    }

    /// Look up a valid session. Expired sessions are removed.
    pub fn get(&mut self, token: &str) -> Result<&MemberSession, SessionError> {
        self.evict_if_invalid(token)?;
        self.sessions
            .get(token)
            .ok_or(SessionError::SessionNotFound)
    }

    /// Look up a valid session and reset its idle timer.
    pub fn touch(&mut self, token: &str) -> Result<&MemberSession, SessionError> {
        self.evict_if_invalid(token)?;
        let session = self
            .sessions
            .get_mut(token)
            .ok_or(SessionError::SessionNotFound)?;
        session.touch();
        Ok(session)
    }

    fn evict_if_invalid(&mut self, token: &str) -> Result<(), SessionError> {
        let valid = match self.sessions.get(token) {
            Some(session) => session.is_valid(self.idle_timeout),
            None => return Err(SessionError::SessionNotFound),
        };
        if !valid {
            self.sessions.remove(token);
            debug!("Evicted expired session");
            return Err(SessionError::SessionExpired);
        }
        Ok(())
    }

    /// Replace the member snapshot in every session of that member.
    ///
    /// Returns the number of sessions refreshed.
    pub fn refresh_member(&mut self, member: &Member) -> usize {
        let mut refreshed = 0;
        for session in self.sessions.values_mut() {
            if session.member.id == member.id {
                session.member = member.clone();
                refreshed += 1;
            }
        }
        refreshed
    }

    /// End a session. Returns false if the token was unknown.
    pub fn logout(&mut self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some(session) => {
                info!(member_id = %session.member.id, "Session logged out");
                true
            }
            None => {
                debug!("Logout: session not found");
                false
            }
        }
    }

    /// Remove expired sessions. Returns the number removed.
    pub fn cleanup(&mut self) -> usize {
        let before = self.sessions.len();
        let idle_timeout = self.idle_timeout;
        self.sessions.retain(|_, s| s.is_valid(idle_timeout));

        let removed = before - self.sessions.len();
        if removed > 0 {
            debug!(removed = removed, "Cleaned up expired sessions");
        }
        removed
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> Member {
        Member {
            id: id.to_string(),
            name: "Tester".to_string(),
            pass: "$argon2id$fake".to_string(),
            email: "t@example.com".to_string(),
            mobile: "010-0000-0000".to_string(),
            zipcode: String::new(),
            address1: String::new(),
            address2: String::new(),
            phone: String::new(),
            email_get: false,
            reg_date: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_session_token_uniqueness() {
        let a = MemberSession::new(member("u1"));
        let b = MemberSession::new(member("u1"));
        assert_ne!(a.token, b.token);
        assert_eq!(a.member_id(), "u1");
    }

    #[test]
    fn test_session_with_zero_duration_is_expired() {
        let session = MemberSession::with_duration(member("u1"), Duration::ZERO);
        assert!(session.is_expired());
        assert!(!session.is_valid(Duration::from_secs(60)));
    }

    #[test]
    fn test_create_and_get() {
        let mut manager = SessionManager::new();
        let session = manager.create(member("u1"));

        let found = manager.get(&session.token).unwrap();
        assert_eq!(found.member.id, "u1");
        assert_eq!(manager.session_count(), 1);
    }

    #[test]
    fn test_get_unknown_token() {
        let mut manager = SessionManager::new();
        assert_eq!(
            manager.get("missing").unwrap_err(),
            SessionError::SessionNotFound
        );
    }

    #[test]
    fn test_idle_session_is_evicted() {
        let mut manager = SessionManager::with_idle_timeout(0);
        let session = manager.create(member("u1"));

        assert_eq!(
            manager.get(&session.token).unwrap_err(),
            SessionError::SessionExpired
        );
        assert_eq!(manager.session_count(), 0);
    }

    #[test]
    fn test_touch() {
        let mut manager = SessionManager::new();
        let session = manager.create(member("u1"));

        assert!(manager.touch(&session.token).is_ok());
        assert!(manager.touch("missing").is_err());
    }

    #[test]
    fn test_logout() {
        let mut manager = SessionManager::new();
        let session = manager.create(member("u1"));

        assert!(manager.logout(&session.token));
        assert!(!manager.logout(&session.token));
        assert!(manager.get(&session.token).is_err());
    }

    #[test]
    fn test_refresh_member() {
        let mut manager = SessionManager::new();
        let first = manager.create(member("u1"));
        let second = manager.create(member("u1"));
        manager.create(member("u2"));

        let mut renamed = member("u1");
        renamed.name = "Renamed".to_string();

        assert_eq!(manager.refresh_member(&renamed), 2);
        assert_eq!(manager.get(&first.token).unwrap().member.name, "Renamed");
        assert_eq!(manager.get(&second.token).unwrap().member.name, "Renamed");
    }

    #[test]
    fn test_cleanup() {
        let mut manager = SessionManager::with_idle_timeout(0);
        manager.create(member("u1"));
        manager.create(member("u2"));

        assert_eq!(manager.cleanup(), 2);
        assert_eq!(manager.session_count(), 0);
    }

    #[test]
    fn test_session_error_display() {
        assert_eq!(SessionError::SessionExpired.to_string(), "session expired");
        assert_eq!(SessionError::SessionNotFound.to_string(), "session not found");
    }
}
