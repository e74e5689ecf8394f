//! Authentication module.
//!
//! Password hashing for member credentials and the server-side session
//! store that replaces ambient per-browser session state.

mod password;
mod session;

pub use password::{hash_password, verify_password, PasswordError};
pub use session::{
    MemberSession, SessionError, SessionManager, DEFAULT_IDLE_TIMEOUT_SECS,
    DEFAULT_SESSION_DURATION_SECS,
};
