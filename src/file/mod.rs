//! Post attachment files.

mod storage;

pub use storage::AttachmentStorage;
