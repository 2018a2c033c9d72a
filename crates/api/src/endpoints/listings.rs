//! Listing endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use termhunt_common::AppResult;
use termhunt_core::{CreateListingInput, UpdateListingInput};
use termhunt_db::entities::listing;

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

// ==================== Request/Response Types ====================

/// Listing response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub user_id: String,
    /// Creator's username, populated on `show`.
    pub creator_handle: Option<String>,
    pub name: String,
    pub tagline: Option<String>,
    pub url: Option<String>,
    pub view_count: i64,
    /// Live vote count, populated on `show`.
    pub vote_count: Option<u64>,
    /// Whether the caller has voted, populated on `show` for signed-in callers.
    pub voted: Option<bool>,
}

impl From<listing::Model> for ListingResponse {
    fn from(l: listing::Model) -> Self {
        Self {
            id: l.id,
            created_at: l.created_at.to_rfc3339(),
            updated_at: l.updated_at.map(|dt| dt.to_rfc3339()),
            user_id: l.user_id,
            creator_handle: None,
            name: l.name,
            tagline: l.tagline,
            url: l.url,
            view_count: l.view_count,
            vote_count: None,
            voted: None,
        }
    }
}

/// Show listing request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowListingRequest {
    pub listing_id: String,
}

/// Delete listing request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteListingRequest {
    pub listing_id: String,
}

/// List listings request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListListingsRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

const fn default_limit() -> u64 {
    10
}

// ==================== Handlers ====================

/// Submit a new listing.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateListingInput>,
) -> AppResult<ApiResponse<ListingResponse>> {
    let listing = state.listing_service.create(&user.id, input).await?;

    Ok(ApiResponse::ok(listing.into()))
}

/// Show a listing with its vote projection.
async fn show(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowListingRequest>,
) -> AppResult<ApiResponse<ListingResponse>> {
    let listing = state.listing_service.get(&req.listing_id).await?;

    let vote_count = state.vote_service.count(&req.listing_id).await?;
    let voted = match user {
        Some(ref user) => Some(state.vote_service.has_voted(&user.id, &req.listing_id).await?),
        None => None,
    };
    let creator = state.user_service.get(&listing.user_id).await.ok();

    let mut response: ListingResponse = listing.into();
    response.creator_handle = creator.map(|u| u.username);
    response.vote_count = Some(vote_count);
    response.voted = voted;

    Ok(ApiResponse::ok(response))
}

/// Browse listings newest first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListListingsRequest>,
) -> AppResult<ApiResponse<Vec<ListingResponse>>> {
    let limit = req.limit.min(100);
    let listings = state
        .listing_service
        .list(limit, req.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        listings.into_iter().map(Into::into).collect(),
    ))
}

/// Update a listing.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateListingInput>,
) -> AppResult<ApiResponse<ListingResponse>> {
    let listing = state.listing_service.update(&user, input).await?;

    Ok(ApiResponse::ok(listing.into()))
}

/// Delete a listing.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteListingRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .listing_service
        .delete(&user, &req.listing_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/list", post(list))
        .route("/update", post(update))
        .route("/delete", post(delete))
}
