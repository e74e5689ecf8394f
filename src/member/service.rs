//! Member service: login, registration and profile updates.

use tracing::{info, warn};

use super::model::{Member, MemberForm};
use super::repository::MemberRepository;
use crate::auth::{hash_password, verify_password, PasswordError};
use crate::db::Database;
use crate::{BbsError, Result};

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// No member with the given id.
    NotFound,
    /// The member exists but the password did not verify.
    BadPassword,
    /// Credentials verified; carries the stored member record.
    Success(Member),
}

impl LoginOutcome {
    /// Legacy numeric result code: -1 not found, 0 bad password, 1 success.
    pub fn code(&self) -> i32 {
        match self {
            LoginOutcome::NotFound => -1,
            LoginOutcome::BadPassword => 0,
            LoginOutcome::Success(_) => 1,
        }
    }
}

fn hash_error(e: PasswordError) -> BbsError {
    BbsError::Auth(e.to_string())
}

/// Service for member operations.
pub struct MemberService<'a> {
    db: &'a Database,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Check a member's credentials.
    pub async fn login(&self, id: &str, pass: &str) -> Result<LoginOutcome> {
        let repo = MemberRepository::new(self.db.pool());
        let Some(member) = repo.get_by_id(id).await? else {
            warn!(member_id = %id, "Login failed: member not found");
            return Ok(LoginOutcome::NotFound);
        };

        match verify_password(pass, &member.pass) {
            Ok(()) => {
                info!(member_id = %id, "Login successful");
                Ok(LoginOutcome::Success(member))
            }
            Err(PasswordError::InvalidHash) => {
                warn!(member_id = %id, "Login failed: stored hash is malformed");
                Ok(LoginOutcome::BadPassword)
            }
            Err(_) => {
                warn!(member_id = %id, "Login failed: wrong password");
                Ok(LoginOutcome::BadPassword)
            }
        }
    }

    /// Whether `id` is already taken.
    pub async fn overlap_id_check(&self, id: &str) -> Result<bool> {
        MemberRepository::new(self.db.pool()).exists(id).await
    }

    /// Register a new member, hashing the password first.
    pub async fn add_member(&self, form: &MemberForm) -> Result<Member> {
        validate_form(form)?;

        let repo = MemberRepository::new(self.db.pool());
        if repo.exists(&form.id).await? {
            return Err(BbsError::Conflict(format!(
                "member id '{}' is already registered",
                form.id
            )));
        }

        let pass_hash = hash_password(&form.pass).map_err(hash_error)?;
        let member = repo.create(&form.to_new_member(pass_hash)).await?;

        info!(member_id = %member.id, "Member registered");
        Ok(member)
    }

    /// Replace a member's profile. The password is re-hashed on every update.
    pub async fn update_member(&self, id: &str, form: &MemberForm) -> Result<Member> {
        validate_form(form)?;

        let pass_hash = hash_password(&form.pass).map_err(hash_error)?;
        let member = MemberRepository::new(self.db.pool())
            .update(id, &form.to_update(pass_hash))
            .await?
            .ok_or_else(|| BbsError::NotFound("member".to_string()))?;

        info!(member_id = %id, "Member profile updated");
        Ok(member)
    }

    /// Verify a member's current password. Unknown ids never match.
    pub async fn member_pass_check(&self, id: &str, pass: &str) -> Result<bool> {
        let stored = MemberRepository::new(self.db.pool()).pass_of(id).await?;
        Ok(stored.is_some_and(|hash| verify_password(pass, &hash).is_ok()))
    }

    /// Look up a member by id.
    pub async fn get_member(&self, id: &str) -> Result<Option<Member>> {
        MemberRepository::new(self.db.pool()).get_by_id(id).await
    }
}

fn validate_form(form: &MemberForm) -> Result<()> {
    if form.id.trim().is_empty() {
        return Err(BbsError::Validation("member id is required".to_string()));
    }
    if form.name.trim().is_empty() {
        return Err(BbsError::Validation("name is required".to_string()));
    }
    if form.pass.is_empty() {
        return Err(BbsError::Validation("password is required".to_string()));
    }
    Ok(())
}
