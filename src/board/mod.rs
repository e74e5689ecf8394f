//! Bulletin board.
//!
//! Posts with paging, search, read counting and a per-post password that
//! must match before a post is edited or deleted.

mod page;
mod post;
mod repository;
mod search;
mod service;

pub use page::{start_row, PageWindow, PAGE_GROUP, PAGE_SIZE};
pub use post::{NewPost, Post, PostUpdate};
pub use repository::PostRepository;
pub use search::{SearchField, SearchFilter, ABSENT_SENTINEL};
pub use service::{BoardPage, BoardService, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH};
