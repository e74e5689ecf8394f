//! Board search filter.
//!
//! A search is only applied when both a field and a keyword are given.
//! Older clients send the literal string `"null"` for an unselected
//! field or keyword, which is treated the same as an absent value.

use std::fmt;
use std::str::FromStr;

/// Legacy placeholder meaning "no value selected".
pub const ABSENT_SENTINEL: &str = "null";

/// Searchable post columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Writer,
    Content,
}

impl SearchField {
    /// Column name in the `posts` table.
    pub fn column(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Writer => "writer",
            SearchField::Content => "content",
        }
    }

    /// Parameter value used in query strings.
    pub fn as_str(&self) -> &'static str {
        self.column()
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "writer" => Ok(SearchField::Writer),
            "content" => Ok(SearchField::Content),
            _ => Err(format!("unknown search field: {s}")),
        }
    }
}

/// An active search: substring match of `keyword` in `field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub field: SearchField,
    pub keyword: String,
}

/// Treat empty strings and the legacy sentinel as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ABSENT_SENTINEL)
}

impl SearchFilter {
    pub fn new(field: SearchField, keyword: impl Into<String>) -> Self {
        Self {
            field,
            keyword: keyword.into(),
        }
    }

    /// Build a filter from raw request parameters.
    ///
    /// Returns `None` unless both parameters are present and the field is
    /// one of the searchable columns.
    pub fn from_params(field: Option<&str>, keyword: Option<&str>) -> Option<Self> {
        let field = present(field)?.parse::<SearchField>().ok()?;
        let keyword = present(keyword)?;
        Some(Self::new(field, keyword))
    }

    /// `LIKE` pattern for the keyword, with wildcard characters escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.keyword.len() + 2);
        pattern.push('%');
        for c in self.keyword.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}
