//! BBS - member registration and bulletin board web service
//!
//! Members register and log in with hashed passwords; anyone can browse
//! the board, while editing or deleting a post requires its password.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod member;
pub mod web;

pub use auth::{hash_password, verify_password, MemberSession, PasswordError, SessionManager};
pub use board::{BoardPage, BoardService, NewPost, PageWindow, Post, PostUpdate, SearchFilter};
pub use config::Config;
pub use db::Database;
pub use error::{BbsError, Result};
pub use file::AttachmentStorage;
pub use member::{LoginOutcome, Member, MemberForm, MemberService};
