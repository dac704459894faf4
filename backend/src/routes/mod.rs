//! Route definitions for the Tea Garden Climate Impact Analyzer

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/inputs", get(handlers::get_input_schema))
        .nest("/analyze", analysis_routes())
}

/// Climate impact analysis routes
fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::analyze))
        .route("/date", post(handlers::analyze_by_date))
}
