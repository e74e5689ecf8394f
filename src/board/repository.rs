//! Post repository.
//!
//! CRUD, filtered count and paged listing for the `posts` table.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::post::{NewPost, Post, PostUpdate};
use super::search::SearchFilter;
use crate::{BbsError, Result};

const POST_COLUMNS: &str = "no, title, writer, content, reg_date, read_count, pass, file1";

/// Append ` WHERE <column> LIKE ?` when a filter is active.
fn push_filter<'q>(query: &mut QueryBuilder<'q, Sqlite>, filter: Option<&SearchFilter>) {
    if let Some(filter) = filter {
        query.push(" WHERE ");
        query.push(filter.field.column());
        query.push(" LIKE ");
        query.push_bind(filter.like_pattern());
        query.push(" ESCAPE '\\'");
    }
}

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a post and return it with its assigned number.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let no: i64 = sqlx::query_scalar(
            "INSERT INTO posts (title, writer, content, pass, file1)
             VALUES (?, ?, ?, ?, ?) RETURNING no",
        )
        .bind(&new_post.title)
        .bind(&new_post.writer)
        .bind(&new_post.content)
        .bind(&new_post.pass)
        .bind(&new_post.file1)
        .fetch_one(self.pool)
        .await
        .map_err(|e| BbsError::Database(e.to_string()))?;

        self.get_by_no(no)
            .await?
            .ok_or_else(|| BbsError::NotFound("post".to_string()))
    }

    /// Get a post by number.
    pub async fn get_by_no(&self, no: i64) -> Result<Option<Post>> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE no = ?");
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(no)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(post)
    }

    /// Get only the stored password of a post.
    pub async fn pass_of(&self, no: i64) -> Result<Option<String>> {
        let pass: Option<String> = sqlx::query_scalar("SELECT pass FROM posts WHERE no = ?")
            .bind(no)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(pass)
    }

    /// Count posts, optionally narrowed by a search filter.
    pub async fn count(&self, filter: Option<&SearchFilter>) -> Result<i64> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM posts");
        push_filter(&mut query, filter);

        let count: i64 = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(count)
    }

    /// List posts newest first, starting at row `offset`.
    pub async fn list(
        &self,
        filter: Option<&SearchFilter>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts"));
        push_filter(&mut query, filter);
        query.push(" ORDER BY no DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let posts = query
            .build_query_as::<Post>()
            .fetch_all(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(posts)
    }

    /// Update a post by number.
    ///
    /// Returns the updated post, or None if not found.
    pub async fn update(&self, no: i64, update: &PostUpdate) -> Result<Option<Post>> {
        if update.is_empty() {
            return self.get_by_no(no).await;
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title);
        }
        if let Some(ref writer) = update.writer {
            separated.push("writer = ");
            separated.push_bind_unseparated(writer);
        }
        if let Some(ref content) = update.content {
            separated.push("content = ");
            separated.push_bind_unseparated(content);
        }

        query.push(" WHERE no = ");
        query.push_bind(no);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_no(no).await
    }

    /// Delete a post. Returns true if a row was removed.
    pub async fn delete(&self, no: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE no = ?")
            .bind(no)
            .execute(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
