use std::str::FromStr;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use sentiscope_core::Sentiment;
use sentiscope_store::{AnalysisRecord, SentimentStats, StoreError};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryQuery {
    pub limit: Option<usize>,
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct Deleted {
    pub message: &'static str,
}

/// `None` for a missing filter or `all`; otherwise one label.
fn parse_filter(raw: Option<&str>) -> Result<Option<Sentiment>, String> {
    match raw.map(str::trim) {
        None | Some("" | "all") => Ok(None),
        Some(label) => Sentiment::from_str(label).map(Some).map_err(|_| {
            format!("filter must be one of all, positive, negative, neutral (got '{label}')")
        }),
    }
}

fn map_store_error(error: &StoreError) -> ApiError {
    match error {
        StoreError::NotFound(_) => ApiError::not_found("Analysis not found"),
    }
}

pub(super) async fn analyze_text(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisRecord>, ApiError> {
    let Json(request) = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
        } else {
            ApiError::bad_request(e.body_text())
        }
    })?;

    if request.text.trim().is_empty() {
        return Err(ApiError::bad_request("Text is required"));
    }

    let analysis = state.analyzer.analyze(&request.text).await;
    let record = state
        .history
        .write()
        .await
        .insert(request.text, analysis, Utc::now());

    tracing::info!(
        request_id = %req_id.0,
        id = record.id,
        sentiment = %record.sentiment,
        source = %record.source,
        "analysis stored"
    );

    Ok(Json(record))
}

pub(super) async fn list_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<AnalysisRecord>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let filter = parse_filter(query.filter.as_deref()).map_err(ApiError::bad_request)?;

    let records = state
        .history
        .read()
        .await
        .list(filter, normalize_limit(query.limit));

    Ok(Json(records))
}

pub(super) async fn delete_history_entry(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Deleted>, ApiError> {
    // A non-numeric id can never name a stored record.
    let Path(id) = id.map_err(|_| ApiError::not_found("Analysis not found"))?;

    state
        .history
        .write()
        .await
        .delete(id)
        .map_err(|e| map_store_error(&e))?;

    tracing::info!(id, "analysis deleted");

    Ok(Json(Deleted {
        message: "Analysis deleted successfully",
    }))
}

pub(super) async fn get_stats(State(state): State<AppState>) -> Json<SentimentStats> {
    Json(state.history.read().await.stats())
}
