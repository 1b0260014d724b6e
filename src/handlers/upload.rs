use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
};
use tracing::{info, warn};

use crate::service::import::{ImportKind, extract_names, secure_filename};
use crate::types::api::UploadResponse;
use crate::{WheelError, router::WheelState};

const FILE_FIELD: &str = "file";

/// POST /upload -> imports first-column names from a CSV or Excel file,
/// skipping names the registry already holds.
pub async fn upload_file(
    State(state): State<WheelState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, WheelError> {
    let (filename, bytes) = read_file_field(&mut multipart).await?;

    if filename.is_empty() {
        return Err(WheelError::validation("No selected file"));
    }
    if ImportKind::from_filename(&filename).is_none() {
        warn!(filename = %filename, "upload rejected: extension not allowed");
        return Err(WheelError::validation("Invalid file type"));
    }

    let safe_name = secure_filename(&filename);
    let Some(kind) = ImportKind::from_filename(&safe_name) else {
        warn!(filename = %filename, sanitized = %safe_name, "upload rejected: extension lost in sanitizing");
        return Err(WheelError::validation("Invalid file type"));
    };

    let size = bytes.len();
    let names = tokio::task::spawn_blocking(move || extract_names(&bytes, kind)).await??;
    let added = state.storage.import_names(&names).await?;

    info!(
        filename = %safe_name,
        kind = ?kind,
        bytes = size,
        candidates = names.len(),
        added,
        "import finished"
    );
    Ok(Json(UploadResponse {
        success: true,
        message: format!("Successfully added {added} new names"),
    }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), WheelError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // Without a filename parameter the part is a plain form value, not a file.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await?;
        return Ok((filename, bytes));
    }
    Err(WheelError::validation("No file part"))
}
