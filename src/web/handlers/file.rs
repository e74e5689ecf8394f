//! Attachment download handler.

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
};
use std::sync::Arc;
use utoipa;

use super::AppState;
use crate::web::error::ApiError;
use crate::BbsError;

/// Generate a safe Content-Disposition header value for downloads.
///
/// Control characters are dropped and quotes or backslashes replaced in the
/// plain `filename`; non-ASCII names also get an RFC 5987 `filename*`.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && sanitized == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let encoded = urlencoding::encode(filename);
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

/// GET /api/files/:name - Download a post attachment.
#[utoipa::path(
    get,
    path = "/api/files/{name}",
    tag = "files",
    params(
        ("name" = String, Path, description = "Stored attachment name")
    ),
    responses(
        (status = 200, description = "Attachment content", content_type = "application/octet-stream"),
        (status = 404, description = "Attachment not found"),
        (status = 422, description = "Invalid attachment name")
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let content = state.storage.load(&name).map_err(|e| match e {
        BbsError::NotFound(_) => ApiError::not_found("Attachment not found"),
        e => ApiError::from(e),
    })?;

    let content_type = mime_guess::from_path(&name)
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition_header(&name))
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}
