//! OpenAPI document for the web API.

use utoipa::OpenApi;

use super::dto::{
    BoardDetailResponse, BoardListResponse, JoinForm, LoginForm, LoginResponse,
    LogoutResponse, MemberInfo, OverlapIdResponse, PagingEcho, PagingParams, PassCheckResponse,
    PostDeletedResponse, PostDetail, PostPasswordForm, PostSummary, PostUpdateForm,
};
use super::handlers::{board, file, member};

#[derive(OpenApi)]
#[openapi(
    info(title = "BBS API", description = "Member registration and bulletin board"),
    paths(
        board::list_posts,
        board::get_post,
        board::create_post,
        board::edit_form,
        board::update_post,
        board::delete_post,
        file::download_file,
        member::login,
        member::logout,
        member::join,
        member::overlap_id_check,
        member::pass_check,
        member::me,
        member::update_me,
    ),
    components(schemas(
        PostSummary,
        PostDetail,
        PagingParams,
        PagingEcho,
        BoardListResponse,
        BoardDetailResponse,
        PostDeletedResponse,
        PostPasswordForm,
        PostUpdateForm,
        LoginForm,
        JoinForm,
        MemberInfo,
        LoginResponse,
        LogoutResponse,
        OverlapIdResponse,
        PassCheckResponse,
    )),
    tags(
        (name = "boards", description = "Board posts"),
        (name = "files", description = "Post attachments"),
        (name = "members", description = "Member accounts and sessions")
    )
)]
pub struct ApiDoc;
