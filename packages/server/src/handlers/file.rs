use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use catalog_common::storage::StorageError;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Declared for every stored file regardless of its actual content.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

#[utoipa::path(
    get,
    path = "/files/{filename}",
    tag = "Files",
    operation_id = "getFile",
    summary = "Download a stored image",
    description = "Streams the file stored under `filename` as an attachment. The content type \
        is always `image/jpeg`.",
    params(("filename" = String, Path, description = "Filename as uploaded")),
    responses(
        (status = 200, description = "File content", content_type = "image/jpeg"),
        (status = 404, description = "No such file (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let (reader, size) = state.store.open(&filename).await.map_err(|e| match e {
        StorageError::NotFound(_) | StorageError::InvalidFilename { .. } => {
            AppError::NotFound("Image not found".into())
        }
        other => other.into(),
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, IMAGE_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&filename),
        )
        .body(Body::from_stream(ReaderStream::new(reader)))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// RFC 5987 `attr-char`s that may appear unescaped in `filename*`.
const ATTR_CHAR_PUNCT: &[u8] = b"!#$&+-.^_`|~";

/// `Content-Disposition` value offering the file as a download.
///
/// `filename` carries a quoted ASCII fallback, `filename*` the exact name.
fn content_disposition_value(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .filter(|c| (c.is_ascii_graphic() || *c == ' ') && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let fallback = match fallback.trim() {
        "" => "download",
        _ => fallback.as_str(),
    };

    let mut encoded = String::with_capacity(filename.len());
    for b in filename.bytes() {
        if b.is_ascii_alphanumeric() || ATTR_CHAR_PUNCT.contains(&b) {
            encoded.push(char::from(b));
        } else {
            encoded.push_str(&format!("%{b:02X}"));
        }
    }

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
