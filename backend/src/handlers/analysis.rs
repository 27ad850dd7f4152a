//! HTTP handlers for fruit image analysis

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use shared::AnalysisResponse;

use crate::error::{AppError, AppResult};
use crate::services::{AnalysisService, ImageUpload};
use crate::AppState;

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

/// Analyze an uploaded fruit image
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<AnalysisResponse>> {
    // A request that is not multipart at all carries no file
    let mut multipart = multipart.map_err(|_| AppError::MissingField(FILE_FIELD.to_string()))?;

    let mut upload: Option<ImageUpload> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        upload = Some(ImageUpload {
            file_name,
            content_type,
            data,
        });
        break;
    }

    let upload = upload.ok_or_else(|| AppError::MissingField(FILE_FIELD.to_string()))?;

    let service = AnalysisService::new(state.config.clone(), state.detector.clone());
    let response = service.analyze(upload).await?;
    Ok(Json(response))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart body: {}", err.body_text()))
    }
}
