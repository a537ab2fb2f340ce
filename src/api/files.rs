//! Data file endpoint.

use std::io::ErrorKind;
use std::path::Path as FsPath;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::AppState;

/// GET /api/files/:filename - Serve a file from the data directory.
pub async fn get_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if !is_plain_filename(&filename) {
        return Err(AppError::BadRequest(format!(
            "Invalid file name '{}'",
            filename
        )));
    }

    let path = state.config.data_dir.join(&filename);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, content_type(&filename))], bytes).into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::NotFound(format!("File {} not found", filename)))
        }
        Err(e) => {
            tracing::error!("Failed to read {:?}: {}", path, e);
            Err(AppError::Internal(format!("Failed to read {}", filename)))
        }
    }
}

/// A single path component with no traversal.
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\'])
}

fn content_type(filename: &str) -> &'static str {
    let ext = FsPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("json") => "application/json",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("mp3") => "audio/mpeg",
        _ => "application/octet-stream",
    }
}
