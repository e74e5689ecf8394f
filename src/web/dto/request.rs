//! Request DTOs.
//!
//! Field names follow the form parameter names used by the site's pages
//! (`pageNum`, `type`, `keyword`, `userId`, ...).

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};
use crate::board::SearchFilter;
use crate::member::MemberForm;

/// Paging and search state carried between list, detail and edit requests.
///
/// Values are kept as strings so that the legacy `"null"` placeholder and
/// empty parameters deserialize instead of being rejected.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PagingParams {
    /// Page number, 1-based. Missing or unparsable means page 1.
    #[serde(rename = "pageNum", default)]
    pub page_num: Option<String>,
    /// Search field: `title`, `writer` or `content`.
    #[serde(rename = "type", default)]
    pub search_type: Option<String>,
    /// Search keyword.
    #[serde(default)]
    pub keyword: Option<String>,
}

impl PagingParams {
    /// Requested page, defaulting to 1.
    pub fn page(&self) -> i64 {
        self.page_num
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .max(1)
    }

    /// Active search filter, if both field and keyword are present.
    pub fn filter(&self) -> Option<SearchFilter> {
        SearchFilter::from_params(self.search_type.as_deref(), self.keyword.as_deref())
    }
}

/// Post password submitted for the edit form or deletion.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostPasswordForm {
    /// Post password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub pass: String,
    #[serde(flatten)]
    pub paging: PagingParams,
}

/// Post edit submission.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostUpdateForm {
    /// Post password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub pass: String,
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub title: String,
    #[validate(custom(function = "not_empty_trimmed"))]
    pub writer: String,
    #[validate(
        length(min = 1, max = 10000, message = "Content must be 1-10000 characters"),
        custom(function = "no_control_chars")
    )]
    pub content: String,
    #[serde(flatten)]
    pub paging: PagingParams,
}

/// New post fields read from the multipart body.
#[derive(Debug, Default, Validate)]
pub struct NewPostForm {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub title: String,
    #[validate(custom(function = "not_empty_trimmed"))]
    pub writer: String,
    #[validate(
        length(min = 1, max = 10000, message = "Content must be 1-10000 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub content: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub pass: String,
}

/// Login form.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    /// Member id.
    #[serde(rename = "userId")]
    #[validate(length(min = 1, message = "Member id is required"))]
    pub user_id: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub pass: String,
}

/// Registration and profile update form.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinForm {
    /// Member id. Ignored on profile update.
    #[serde(default)]
    #[validate(length(max = 20, message = "Member id must be at most 20 characters"))]
    pub id: String,
    #[validate(
        length(min = 1, max = 30, message = "Name must be 1-30 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub name: String,
    /// Password (plaintext; hashed before storage).
    #[serde(alias = "pass1")]
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub pass: String,
    #[validate(length(min = 1, message = "E-mail id is required"))]
    pub email_id: String,
    #[validate(length(min = 1, message = "E-mail domain is required"))]
    pub email_domain: String,
    pub mobile1: String,
    pub mobile2: String,
    pub mobile3: String,
    #[serde(default)]
    pub phone1: String,
    #[serde(default)]
    pub phone2: String,
    #[serde(default)]
    pub phone3: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    /// E-mail opt-in. A missing parameter means `false`.
    #[serde(default)]
    pub email_get: bool,
}

impl JoinForm {
    /// Convert into the domain form.
    pub fn into_member_form(self) -> MemberForm {
        MemberForm {
            id: self.id.trim().to_string(),
            name: self.name,
            pass: self.pass,
            email_id: self.email_id,
            email_domain: self.email_domain,
            mobile1: self.mobile1,
            mobile2: self.mobile2,
            mobile3: self.mobile3,
            phone1: self.phone1,
            phone2: self.phone2,
            phone3: self.phone3,
            zipcode: self.zipcode,
            address1: self.address1,
            address2: self.address2,
            email_get: self.email_get,
        }
    }
}

/// Duplicate-id check query.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OverlapIdQuery {
    /// Member id to check.
    pub id: String,
}

/// Member password check query.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PassCheckQuery {
    /// Member id.
    pub id: String,
    /// Password to verify.
    pub pass: String,
}
