use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::service::{RecommendationService, SubmitRequest, SubmitResponse, SummaryRequest};
use super::summary::ResponseSummary;
use crate::error::AppError;

/// Router builder exposing the catalog, recommendation, and summary endpoints.
pub fn recommendation_router(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route("/api/recommend", get(questions_handler).post(submit_handler))
        .route("/api/recommend/summary", post(summary_handler))
        .with_state(service)
}

pub(crate) async fn questions_handler(
    State(service): State<Arc<RecommendationService>>,
) -> Response {
    (StatusCode::OK, Json(service.questions())).into_response()
}

pub(crate) async fn submit_handler(
    State(service): State<Arc<RecommendationService>>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(request) = payload?;
    let response = service.submit(request)?;
    Ok(Json(response))
}

pub(crate) async fn summary_handler(
    State(service): State<Arc<RecommendationService>>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<ResponseSummary>, AppError> {
    let Json(request) = payload?;
    Ok(Json(service.summarize(&request.responses)))
}
