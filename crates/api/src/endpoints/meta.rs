//! Meta endpoints.

use axum::{Router, routing::post};
use serde::Serialize;

use crate::{middleware::AppState, response::ApiResponse};

/// Liveness response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub pong: bool,
    pub version: String,
}

/// Liveness check.
async fn ping() -> ApiResponse<PingResponse> {
    ApiResponse::ok(PingResponse {
        pong: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ping", post(ping))
}
