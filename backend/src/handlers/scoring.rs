//! HTTP handlers for scoring known quality signals

use axum::{extract::rejection::JsonRejection, Json};
use serde::Deserialize;
use shared::{score_checked, FruitType, QualityReport};

use crate::error::{AppError, AppResult};

/// Quality signals supplied directly by the client
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub fruit_type: String,
    pub freshness: f64,
    pub ripeness: f64,
}

/// Score fruit type, freshness and ripeness without an image
pub async fn score_quality(
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> AppResult<Json<QualityReport>> {
    let Json(request) = payload.map_err(|e| AppError::UnprocessableBody(e.body_text()))?;

    let fruit_type: FruitType = request.fruit_type.parse()?;
    let report = score_checked(fruit_type, request.freshness, request.ripeness)?;
    Ok(Json(report))
}
