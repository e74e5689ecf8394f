//! Board service.
//!
//! Paged and searchable post listing, detail views with read counting, and
//! the password gate that guards editing and deleting posts.

use tracing::{info, warn};

use super::page::PageWindow;
use super::post::{NewPost, Post, PostUpdate};
use super::repository::PostRepository;
use super::search::SearchFilter;
use crate::db::Database;
use crate::{BbsError, Result};

/// Maximum length for post titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum length for post content (in characters).
pub const MAX_CONTENT_LENGTH: usize = 10_000;

fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BbsError::Validation(format!("{what} is required")));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<()> {
    require(title, "title")?;
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(BbsError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<()> {
    require(content, "content")?;
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(BbsError::Validation(format!(
            "content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// One page of the board list.
#[derive(Debug, Clone)]
pub struct BoardPage {
    /// Posts on this page, newest first.
    pub posts: Vec<Post>,
    /// Paging window computed from the matching row count.
    pub window: PageWindow,
    /// Search applied to both the count and the slice, if any.
    pub search: Option<SearchFilter>,
}

impl BoardPage {
    /// Whether the list was narrowed by a search.
    pub fn search_option(&self) -> bool {
        self.search.is_some()
    }
}

/// Service for board operations.
pub struct BoardService<'a> {
    db: &'a Database,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List one page of posts, optionally filtered.
    pub async fn board_list(&self, page_num: i64, search: Option<SearchFilter>) -> Result<BoardPage> {
        let repo = PostRepository::new(self.db.pool());

        let list_count = repo.count(search.as_ref()).await?;
        let window = PageWindow::new(page_num, list_count);
        let posts = repo
            .list(search.as_ref(), window.start_row(), window.page_size)
            .await?;

        Ok(BoardPage {
            posts,
            window,
            search,
        })
    }

    /// Fetch a post.
    ///
    /// With `count_view` the read count is incremented and the row re-read
    /// inside one transaction; otherwise (edit forms) the count is untouched.
    pub async fn get_post(&self, no: i64, count_view: bool) -> Result<Post> {
        if !count_view {
            return PostRepository::new(self.db.pool())
                .get_by_no(no)
                .await?
                .ok_or_else(|| BbsError::NotFound("post".to_string()));
        }

        let mut tx = self.db.begin().await?;

        let result = sqlx::query("UPDATE posts SET read_count = read_count + 1 WHERE no = ?")
            .bind(no)
            .execute(&mut *tx)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(BbsError::NotFound("post".to_string()));
        }

        let post = sqlx::query_as::<_, Post>(
            "SELECT no, title, writer, content, reg_date, read_count, pass, file1
             FROM posts WHERE no = ?",
        )
        .bind(no)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| BbsError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(post)
    }

    /// Compare `pass` with the stored post password.
    ///
    /// The post password is kept as entered and compared for equality.
    pub async fn check_password(&self, no: i64, pass: &str) -> Result<bool> {
        let stored = PostRepository::new(self.db.pool())
            .pass_of(no)
            .await?
            .ok_or_else(|| BbsError::NotFound("post".to_string()))?;

        Ok(stored == pass)
    }

    async fn require_password(&self, no: i64, pass: &str) -> Result<()> {
        if self.check_password(no, pass).await? {
            return Ok(());
        }
        warn!(post_no = no, "Post password mismatch");
        Err(BbsError::BadPassword(
            "the post password does not match".to_string(),
        ))
    }

    /// Fetch a post for its edit form after the password gate.
    /// The read count is not changed.
    pub async fn get_post_for_edit(&self, no: i64, pass: &str) -> Result<Post> {
        self.require_password(no, pass).await?;
        self.get_post(no, false).await
    }

    /// Create a post.
    pub async fn add_post(&self, new_post: &NewPost) -> Result<Post> {
        validate_title(&new_post.title)?;
        require(&new_post.writer, "writer")?;
        validate_content(&new_post.content)?;
        require(&new_post.pass, "password")?;

        let post = PostRepository::new(self.db.pool()).create(new_post).await?;
        info!(post_no = post.no, writer = %post.writer, "Post created");
        Ok(post)
    }

    /// Update a post after the password gate.
    pub async fn update_post(&self, no: i64, pass: &str, update: &PostUpdate) -> Result<Post> {
        if let Some(ref title) = update.title {
            validate_title(title)?;
        }
        if let Some(ref writer) = update.writer {
            require(writer, "writer")?;
        }
        if let Some(ref content) = update.content {
            validate_content(content)?;
        }

        self.require_password(no, pass).await?;

        let post = PostRepository::new(self.db.pool())
            .update(no, update)
            .await?
            .ok_or_else(|| BbsError::NotFound("post".to_string()))?;

        info!(post_no = no, "Post updated");
        Ok(post)
    }

    /// Delete a post after the password gate.
    ///
    /// Returns the deleted post so the caller can remove its attachment.
    pub async fn delete_post(&self, no: i64, pass: &str) -> Result<Post> {
        self.require_password(no, pass).await?;

        let repo = PostRepository::new(self.db.pool());
        let post = repo
            .get_by_no(no)
            .await?
            .ok_or_else(|| BbsError::NotFound("post".to_string()))?;
        if !repo.delete(no).await? {
            return Err(BbsError::NotFound("post".to_string()));
        }

        info!(post_no = no, "Post deleted");
        Ok(post)
    }
}
