//! API handlers.

pub mod board;
pub mod file;
pub mod member;

pub use board::*;
pub use file::*;
pub use member::*;

use tokio::sync::RwLock;

use crate::auth::SessionManager;
use crate::config::Config;
use crate::db::Database;
use crate::file::AttachmentStorage;
use crate::Result;

/// Shared application state.
pub struct AppState {
    /// Database pool.
    pub db: Database,
    /// Logged-in member sessions.
    pub sessions: RwLock<SessionManager>,
    /// Attachment storage.
    pub storage: AttachmentStorage,
    /// Maximum attachment size in bytes.
    pub max_upload_size: u64,
    /// Cookie that carries the session token.
    pub session_cookie_name: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, storage: AttachmentStorage) -> Self {
        let defaults = Config::default();
        Self {
            db,
            sessions: RwLock::new(SessionManager::new()),
            storage,
            max_upload_size: defaults.max_upload_bytes(),
            session_cookie_name: defaults.web.session_cookie_name,
        }
    }

    /// Build the state from configuration, opening the attachment directory.
    pub fn from_config(config: &Config, db: Database) -> Result<Self> {
        let storage = AttachmentStorage::new(&config.files.storage_path)?;
        tracing::info!("Attachment storage at: {}", config.files.storage_path);

        Ok(Self {
            db,
            sessions: RwLock::new(SessionManager::with_idle_timeout(
                config.web.session_idle_timeout_secs,
            )),
            storage,
            max_upload_size: config.max_upload_bytes(),
            session_cookie_name: config.web.session_cookie_name.clone(),
        })
    }

    /// Set the maximum attachment size in bytes.
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }

    /// Set the session idle timeout.
    pub fn with_session_idle_timeout(mut self, secs: u64) -> Self {
        self.sessions = RwLock::new(SessionManager::with_idle_timeout(secs));
        self
    }
}
