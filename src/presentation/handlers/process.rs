use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{LlmClient, TextExtractor};
use crate::application::services::ProcessError;
use crate::domain::UploadedFile;
use crate::presentation::state::AppState;

const OUTPUT_FILENAME: &str = "filled.pdf";

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct MethodResponse {
    pub message: &'static str,
}

/// Non-POST access to the processing route.
pub async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MethodResponse {
            message: "POST only",
        }),
    )
}

/// Accepts the multipart upload, runs the pipeline, and returns either the
/// finished PDF or a JSON error. Never a partial document.
#[tracing::instrument(skip(state, multipart))]
pub async fn process_handler<E, L>(
    State(state): State<AppState<E, L>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    E: TextExtractor + 'static,
    L: LlmClient + 'static,
{
    let mut files: Vec<UploadedFile> = Vec::new();
    let mut free_text: Option<String> = None;
    let max_bytes = state.settings.limits.max_upload_bytes;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart body");
                return bad_request(format!("failed to read multipart body: {e}"));
            }
        };

        let part_name = field.name().map(str::to_string);
        match part_name.as_deref() {
            Some("files") | Some("file") => {
                let filename = match field.file_name() {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => return bad_request("file part is missing a filename".to_string()),
                };
                let data = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => {
                        return bad_request(format!("failed to read file {filename}: {e}"));
                    }
                };
                tracing::debug!(filename = %filename, bytes = data.len(), "File part received");

                match UploadedFile::new(filename, data, max_bytes) {
                    Ok(file) => files.push(file),
                    Err(e) => return bad_request(e.to_string()),
                }
            }
            Some("text") => match field.text().await {
                Ok(text) => free_text = Some(text),
                Err(e) => return bad_request(format!("failed to read text part: {e}")),
            },
            other => {
                tracing::debug!(part = ?other, "Ignoring unknown multipart part");
            }
        }
    }

    if files.is_empty() && free_text.as_deref().map_or(true, |t| t.trim().is_empty()) {
        return bad_request("no file uploaded and no text supplied".to_string());
    }

    match state.processing_service.process(files, free_text).await {
        Ok(pdf_bytes) => {
            tracing::info!(bytes = pdf_bytes.len(), "Returning filled document");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{OUTPUT_FILENAME}\""),
                    ),
                ],
                pdf_bytes,
            )
                .into_response()
        }
        Err(e) => {
            let status = match &e {
                ProcessError::BadRequest(_) => StatusCode::BAD_REQUEST,
                ProcessError::ServiceFailure(_) | ProcessError::DataFailure(_) => {
                    StatusCode::BAD_GATEWAY
                }
                ProcessError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!(error = %e, status = %status, "Processing failed");
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn bad_request(message: String) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}
