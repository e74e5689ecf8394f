//! Board post model.

/// A board post.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    /// Post number, assigned on insert.
    pub no: i64,
    pub title: String,
    /// Author display name as typed by the poster.
    pub writer: String,
    pub content: String,
    /// Creation timestamp (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub reg_date: String,
    /// Number of detail views.
    pub read_count: i64,
    /// Post password, stored as entered.
    pub pass: String,
    /// Stored attachment name, if a file was uploaded.
    pub file1: Option<String>,
}

impl Post {
    /// Check if the post carries an attachment.
    pub fn has_attachment(&self) -> bool {
        self.file1.is_some()
    }
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub writer: String,
    pub content: String,
    pub pass: String,
    pub file1: Option<String>,
}

impl NewPost {
    /// Create a new post without attachment.
    pub fn new(
        title: impl Into<String>,
        writer: impl Into<String>,
        content: impl Into<String>,
        pass: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            writer: writer.into(),
            content: content.into(),
            pass: pass.into(),
            file1: None,
        }
    }

    /// Attach a stored file name.
    pub fn with_file(mut self, stored_name: impl Into<String>) -> Self {
        self.file1 = Some(stored_name.into());
        self
    }
}

/// Editable post fields. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub writer: Option<String>,
    pub content: Option<String>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn writer(mut self, writer: impl Into<String>) -> Self {
        self.writer = Some(writer.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Check if any field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.writer.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_builder() {
        let post = NewPost::new("Title", "Writer", "Body", "1234");
        assert_eq!(post.title, "Title");
        assert_eq!(post.pass, "1234");
        assert!(post.file1.is_none());

        let post = post.with_file("abc.png");
        assert_eq!(post.file1.as_deref(), Some("abc.png"));
    }

    #[test]
    fn test_post_update_builder() {
        let update = PostUpdate::new();
        assert!(update.is_empty());

        let update = update.title("New").content("Changed");
        assert!(!update.is_empty());
        assert_eq!(update.title.as_deref(), Some("New"));
        assert!(update.writer.is_none());
    }
}
