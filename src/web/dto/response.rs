//! Response DTOs for the web API.
//!
//! Post and member passwords never appear in any response type.

use serde::Serialize;
use utoipa::ToSchema;

use super::request::PagingParams;
use crate::board::{BoardPage, Post};
use crate::member::{LoginOutcome, Member};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Post row in the board list.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostSummary {
    pub no: i64,
    pub title: String,
    pub writer: String,
    pub reg_date: String,
    pub read_count: i64,
    /// Whether the post has an attachment.
    pub has_file: bool,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            has_file: post.has_attachment(),
            no: post.no,
            title: post.title,
            writer: post.writer,
            reg_date: post.reg_date,
            read_count: post.read_count,
        }
    }
}

/// Full post content.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostDetail {
    pub no: i64,
    pub title: String,
    pub writer: String,
    pub content: String,
    pub reg_date: String,
    pub read_count: i64,
    /// Stored attachment name, downloadable under `/api/files/{name}`.
    pub file1: Option<String>,
}

impl From<Post> for PostDetail {
    fn from(post: Post) -> Self {
        Self {
            no: post.no,
            title: post.title,
            writer: post.writer,
            content: post.content,
            reg_date: post.reg_date,
            read_count: post.read_count,
            file1: post.file1,
        }
    }
}

/// Paging and search state echoed back so the client can return to the
/// same list page.
#[derive(Debug, Serialize, ToSchema)]
pub struct PagingEcho {
    #[serde(rename = "pageNum")]
    pub page_num: i64,
    /// True when a search was active.
    #[serde(rename = "searchOption")]
    pub search_option: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl From<&PagingParams> for PagingEcho {
    fn from(params: &PagingParams) -> Self {
        let filter = params.filter();
        Self {
            page_num: params.page(),
            search_option: filter.is_some(),
            search_type: filter.as_ref().map(|f| f.field.as_str().to_string()),
            keyword: filter.map(|f| f.keyword),
        }
    }
}

/// Board list page.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoardListResponse {
    pub posts: Vec<PostSummary>,
    pub current_page: i64,
    pub list_count: i64,
    pub page_count: i64,
    pub start_page: i64,
    pub end_page: i64,
    pub page_group: i64,
    /// True when a search was active.
    pub search_option: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl From<BoardPage> for BoardListResponse {
    fn from(page: BoardPage) -> Self {
        let search_option = page.search_option();
        let window = page.window;
        Self {
            posts: page.posts.into_iter().map(PostSummary::from).collect(),
            current_page: window.current_page,
            list_count: window.list_count,
            page_count: window.page_count,
            start_page: window.start_page,
            end_page: window.end_page,
            page_group: window.page_group,
            search_option,
            search_type: page.search.as_ref().map(|f| f.field.as_str().to_string()),
            keyword: page.search.map(|f| f.keyword),
        }
    }
}

/// Post detail with the list state to return to.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoardDetailResponse {
    pub post: PostDetail,
    pub paging: PagingEcho,
}

/// Result of a post deletion.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostDeletedResponse {
    pub no: i64,
    pub paging: PagingEcho,
}

/// Member information, without the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub zipcode: String,
    pub address1: String,
    pub address2: String,
    pub phone: String,
    pub email_get: bool,
    pub reg_date: String,
}

impl From<Member> for MemberInfo {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
            email: member.email,
            mobile: member.mobile,
            zipcode: member.zipcode,
            address1: member.address1,
            address2: member.address2,
            phone: member.phone,
            email_get: member.email_get,
            reg_date: member.reg_date,
        }
    }
}

/// Successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Login result code, always 1 on success.
    pub result: i32,
    pub member: MemberInfo,
}

impl LoginResponse {
    pub fn new(member: Member) -> Self {
        Self {
            result: LoginOutcome::Success(member.clone()).code(),
            member: member.into(),
        }
    }
}

/// Logout result.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    /// False if there was no live session to end.
    pub logged_out: bool,
}

/// Duplicate-id check result.
#[derive(Debug, Serialize, ToSchema)]
pub struct OverlapIdResponse {
    pub id: String,
    /// True if the id is already taken.
    pub overlap: bool,
}

/// Member password check result.
#[derive(Debug, Serialize, ToSchema)]
pub struct PassCheckResponse {
    pub result: bool,
}
