//! API endpoints.

mod leaderboard;
mod listings;
mod meta;
mod views;
mod votes;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(meta::router())
        .nest("/votes", votes::router())
        .nest("/views", views::router())
        .nest("/leaderboard", leaderboard::router())
        .nest("/listings", listings::router())
}
