//! View endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use termhunt_common::AppResult;

use crate::{middleware::AppState, response::ApiResponse};

/// Record view request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordViewRequest {
    pub listing_id: String,
}

/// Record view response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordViewResponse {
    pub success: bool,
}

/// Record one view of a listing. No authentication; every call counts.
async fn record(
    State(state): State<AppState>,
    Json(req): Json<RecordViewRequest>,
) -> AppResult<ApiResponse<RecordViewResponse>> {
    state.view_service.record(&req.listing_id).await?;

    Ok(ApiResponse::ok(RecordViewResponse { success: true }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/record", post(record))
}
