//! HTTP handlers for climate impact analysis endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use shared::InputSchema;

use crate::error::{AppError, AppResult};
use crate::services::analysis::{
    AnalysisReport, AnalysisService, AnalyzeByDateInput, AnalyzeInput,
};
use crate::AppState;

/// Describe the analyzer inputs, their ranges and defaults
pub async fn get_input_schema() -> Json<InputSchema> {
    Json(InputSchema::default())
}

/// Analyze a climate reading for a given month and week
pub async fn analyze(
    State(state): State<AppState>,
    input: Result<Json<AnalyzeInput>, JsonRejection>,
) -> AppResult<Json<AnalysisReport>> {
    let Json(input) = input.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let service = AnalysisService::new(state.engine);
    let report = service.analyze(input)?;
    Ok(Json(report))
}

/// Analyze a climate reading taken on a calendar date
pub async fn analyze_by_date(
    State(state): State<AppState>,
    input: Result<Json<AnalyzeByDateInput>, JsonRejection>,
) -> AppResult<Json<AnalysisReport>> {
    let Json(input) = input.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let service = AnalysisService::new(state.engine);
    let report = service.analyze_by_date(input)?;
    Ok(Json(report))
}
