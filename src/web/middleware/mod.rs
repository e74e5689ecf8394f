//! Middleware for the web API.

pub mod cors;
pub mod session;

pub use cors::create_cors_layer;
pub use session::{session_token, SessionMember};
