//! Vote endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use termhunt_common::AppResult;
use termhunt_core::VoteOutcome;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Toggle/remove vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub listing_id: String,
}

/// Toggle the caller's vote on a listing.
async fn toggle(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<VoteRequest>,
) -> AppResult<ApiResponse<VoteOutcome>> {
    let outcome = state.vote_service.toggle(&user.id, &req.listing_id).await?;

    Ok(ApiResponse::ok(outcome))
}

/// Remove the caller's vote from a listing. A no-op when no vote exists.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<VoteRequest>,
) -> AppResult<ApiResponse<VoteOutcome>> {
    let outcome = state.vote_service.remove(&user.id, &req.listing_id).await?;

    Ok(ApiResponse::ok(outcome))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(toggle))
        .route("/delete", post(delete))
}
