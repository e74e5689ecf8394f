//! Board handlers for the web API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use utoipa;
use validator::Validate;

use super::AppState;
use crate::board::{BoardService, NewPost, PostUpdate};
use crate::file::AttachmentStorage;
use crate::web::dto::{
    ApiResponse, BoardDetailResponse, BoardListResponse, NewPostForm, PagingEcho, PagingParams,
    PostDeletedResponse, PostDetail, PostPasswordForm, PostUpdateForm, ValidatedForm,
};
use crate::web::error::ApiError;

/// Multipart field carrying the optional attachment.
const ATTACHMENT_FIELD: &str = "addFile";

/// GET /api/boards - List posts, one page at a time.
#[utoipa::path(
    get,
    path = "/api/boards",
    tag = "boards",
    params(PagingParams),
    responses(
        (status = 200, description = "One page of posts with its page window", body = BoardListResponse)
    )
)]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PagingParams>,
) -> Result<Json<ApiResponse<BoardListResponse>>, ApiError> {
    let page = BoardService::new(&state.db)
        .board_list(params.page(), params.filter())
        .await?;

    Ok(Json(ApiResponse::new(page.into())))
}

/// GET /api/boards/:no - Show a post and count the view.
#[utoipa::path(
    get,
    path = "/api/boards/{no}",
    tag = "boards",
    params(
        ("no" = i64, Path, description = "Post number"),
        PagingParams
    ),
    responses(
        (status = 200, description = "Post detail", body = BoardDetailResponse),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(no): Path<i64>,
    Query(params): Query<PagingParams>,
) -> Result<Json<ApiResponse<BoardDetailResponse>>, ApiError> {
    let post = BoardService::new(&state.db).get_post(no, true).await?;

    Ok(Json(ApiResponse::new(BoardDetailResponse {
        post: post.into(),
        paging: PagingEcho::from(&params),
    })))
}

/// POST /api/boards - Create a post.
///
/// Request body: multipart/form-data with `title`, `writer`, `content`,
/// `pass` and an optional `addFile` attachment.
#[utoipa::path(
    post,
    path = "/api/boards",
    tag = "boards",
    responses(
        (status = 201, description = "Post created", body = PostDetail),
        (status = 400, description = "Malformed multipart body"),
        (status = 413, description = "Attachment too large"),
        (status = 422, description = "Missing or invalid field")
    )
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PostDetail>>), ApiError> {
    let mut form = NewPostForm::default();
    let mut attachment: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            ATTACHMENT_FIELD => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was chosen
                if !filename.is_empty() && !content.is_empty() {
                    attachment = Some((filename, content.to_vec()));
                }
            }
            "title" | "writer" | "content" | "pass" => {
                let value = field.text().await.map_err(multipart_error)?;
                match name.as_str() {
                    "title" => form.title = value,
                    "writer" => form.writer = value,
                    "content" => form.content = value,
                    _ => form.pass = value,
                }
            }
            _ => {}
        }
    }

    form.validate()?;

    let mut new_post = NewPost::new(&form.title, &form.writer, &form.content, &form.pass);
    let mut stored_name = None;

    if let Some((filename, content)) = attachment {
        if content.len() as u64 > state.max_upload_size {
            let max_mb = state.max_upload_size / 1024 / 1024;
            return Err(ApiError::payload_too_large(format!(
                "File too large (max {}MB)",
                max_mb
            )));
        }

        let name = state.storage.save(&content, &filename).map_err(|e| {
            tracing::error!("Failed to save attachment: {}", e);
            ApiError::internal("Failed to save attachment")
        })?;
        tracing::debug!(original = %filename, stored = %name, "Attachment stored");
        new_post = new_post.with_file(&name);
        stored_name = Some(name);
    }

    let post = match BoardService::new(&state.db).add_post(&new_post).await {
        Ok(post) => post,
        Err(e) => {
            if let Some(ref name) = stored_name {
                discard_attachment(&state.storage, name);
            }
            return Err(e.into());
        }
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::new(post.into()))))
}

/// POST /api/boards/:no/edit - Fetch a post for editing after the password check.
///
/// The read count is not changed.
#[utoipa::path(
    post,
    path = "/api/boards/{no}/edit",
    tag = "boards",
    params(("no" = i64, Path, description = "Post number")),
    request_body(content = PostPasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Post to edit", body = BoardDetailResponse),
        (status = 403, description = "Password mismatch"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(no): Path<i64>,
    ValidatedForm(form): ValidatedForm<PostPasswordForm>,
) -> Result<Json<ApiResponse<BoardDetailResponse>>, ApiError> {
    let post = BoardService::new(&state.db)
        .get_post_for_edit(no, &form.pass)
        .await?;

    Ok(Json(ApiResponse::new(BoardDetailResponse {
        post: post.into(),
        paging: PagingEcho::from(&form.paging),
    })))
}

/// PUT /api/boards/:no - Update a post after the password check.
#[utoipa::path(
    put,
    path = "/api/boards/{no}",
    tag = "boards",
    params(("no" = i64, Path, description = "Post number")),
    request_body(content = PostUpdateForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Updated post", body = BoardDetailResponse),
        (status = 403, description = "Password mismatch"),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(no): Path<i64>,
    ValidatedForm(form): ValidatedForm<PostUpdateForm>,
) -> Result<Json<ApiResponse<BoardDetailResponse>>, ApiError> {
    let update = PostUpdate::new()
        .title(form.title)
        .writer(form.writer)
        .content(form.content);

    let post = BoardService::new(&state.db)
        .update_post(no, &form.pass, &update)
        .await?;

    Ok(Json(ApiResponse::new(BoardDetailResponse {
        post: post.into(),
        paging: PagingEcho::from(&form.paging),
    })))
}

/// DELETE /api/boards/:no - Delete a post after the password check.
///
/// The attachment, if any, is removed from storage as well.
#[utoipa::path(
    delete,
    path = "/api/boards/{no}",
    tag = "boards",
    params(("no" = i64, Path, description = "Post number")),
    request_body(content = PostPasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Post deleted", body = PostDeletedResponse),
        (status = 403, description = "Password mismatch"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(no): Path<i64>,
    ValidatedForm(form): ValidatedForm<PostPasswordForm>,
) -> Result<Json<ApiResponse<PostDeletedResponse>>, ApiError> {
    let post = BoardService::new(&state.db)
        .delete_post(no, &form.pass)
        .await?;

    if let Some(ref name) = post.file1 {
        discard_attachment(&state.storage, name);
    }

    Ok(Json(ApiResponse::new(PostDeletedResponse {
        no: post.no,
        paging: PagingEcho::from(&form.paging),
    })))
}

/// Remove a stored attachment, logging instead of failing the request.
///
/// Returns whether the file was removed.
fn discard_attachment(storage: &AttachmentStorage, name: &str) -> bool {
    match storage.delete(name) {
        Ok(true) => {
            tracing::debug!(stored = %name, "Attachment removed");
            true
        }
        Ok(false) => {
            tracing::warn!(stored = %name, "Attachment already missing");
            false
        }
        Err(e) => {
            tracing::warn!(stored = %name, "Failed to remove attachment: {}", e);
            false
        }
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::payload_too_large("Request body too large");
    }
    tracing::debug!("Failed to read multipart field: {}", e);
    ApiError::bad_request("Invalid multipart data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discard_attachment() {
        let temp_dir = TempDir::new().unwrap();
        let storage = AttachmentStorage::new(temp_dir.path()).unwrap();
        let name = storage.save(b"orphan", "orphan.txt").unwrap();

        assert!(discard_attachment(&storage, &name));
        assert!(!storage.exists(&name));

        // Missing and unsafe names are logged, not raised
        assert!(!discard_attachment(&storage, &name));
        assert!(!discard_attachment(&storage, "../escape.txt"));
    }
}
