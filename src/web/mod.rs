//! Web API module for the BBS.
//!
//! A JSON API over the board and member services. Logged-in members are
//! tracked by a session cookie.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use router::create_router;
pub use server::WebServer;
