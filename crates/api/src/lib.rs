//! HTTP API layer for termhunt.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: votes, views, leaderboard, and the listing directory
//! - **Extractors**: bearer-token authentication
//! - **Middleware**: application state and token resolution
//!
//! Built on Axum 0.8 with a Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
