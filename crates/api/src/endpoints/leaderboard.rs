//! Leaderboard endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use termhunt_common::AppResult;
use termhunt_core::{Signal, Window};
use termhunt_db::repositories::LeaderboardEntry;

use crate::{middleware::AppState, response::ApiResponse};

/// Leaderboard request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRequest {
    pub window: Window,
    pub signal: Signal,
    pub limit: Option<u64>,
}

/// Leaderboard entry response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub listing_id: String,
    pub name: String,
    pub creator_handle: String,
    pub count: i64,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(e: LeaderboardEntry) -> Self {
        Self {
            listing_id: e.listing_id,
            name: e.name,
            creator_handle: e.creator_handle,
            count: e.count,
        }
    }
}

/// Compute a ranked listing board for a time window and signal.
async fn compute(
    State(state): State<AppState>,
    Json(req): Json<LeaderboardRequest>,
) -> AppResult<ApiResponse<Vec<LeaderboardEntryResponse>>> {
    let entries = state
        .leaderboard_service
        .compute(req.window, req.signal, req.limit)
        .await?;

    Ok(ApiResponse::ok(entries.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(compute))
}
