//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use termhunt_core::{LeaderboardService, ListingService, UserService, ViewService, VoteService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub listing_service: ListingService,
    pub vote_service: VoteService,
    pub view_service: ViewService,
    pub leaderboard_service: LeaderboardService,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to a user and stashes the model in request
/// extensions. Requests without a valid token pass through anonymously;
/// handlers that need a user reject via the `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                if let Ok(user) = state.user_service.authenticate_by_token(token).await {
                    req.extensions_mut().insert(user);
                }
            }
        }
    }

    next.run(req).await
}
