//! Vote service.

use serde::Serialize;
use termhunt_common::{AppError, AppResult, IdGenerator};
use termhunt_db::repositories::{ListingRepository, VoteRepository};

/// State of the ledger after a vote mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    /// Whether the caller holds a vote on the listing after the call.
    pub voted: bool,
    /// The listing's vote count after the call.
    pub vote_count: u64,
}

/// Service for the vote ledger.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: VoteRepository,
    listing_repo: ListingRepository,
    id_gen: IdGenerator,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(vote_repo: VoteRepository, listing_repo: ListingRepository) -> Self {
        Self {
            vote_repo,
            listing_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle the caller's vote on a listing.
    ///
    /// Casts a vote if the caller holds none, retracts the existing one
    /// otherwise. The outcome reports the ledger state left behind, with the
    /// count recomputed from vote rows rather than read from a cache.
    pub async fn toggle(&self, user_id: &str, listing_id: &str) -> AppResult<VoteOutcome> {
        // Reject unknown listings before touching the ledger
        self.listing_repo.get_by_id(listing_id).await?;

        let vote_id = self.id_gen.generate();
        let result = self.vote_repo.toggle(&vote_id, user_id, listing_id).await;

        let (voted, vote_count) = match result {
            // Lost the insert race against a concurrent toggle for the same
            // pair. The winner's row is now in place, so a single re-run
            // observes it and completes the toggle.
            Err(AppError::Conflict(_)) => {
                let retry_id = self.id_gen.generate();
                self.vote_repo
                    .toggle(&retry_id, user_id, listing_id)
                    .await?
            }
            other => other?,
        };

        tracing::info!(
            user_id = %user_id,
            listing_id = %listing_id,
            voted = voted,
            vote_count = vote_count,
            "vote toggled"
        );

        Ok(VoteOutcome { voted, vote_count })
    }

    /// Remove the caller's vote from a listing.
    ///
    /// A no-op when no vote exists; either way the outcome reports
    /// `voted: false` and the count after removal.
    pub async fn remove(&self, user_id: &str, listing_id: &str) -> AppResult<VoteOutcome> {
        self.listing_repo.get_by_id(listing_id).await?;

        let removed = self
            .vote_repo
            .delete_by_user_and_listing(user_id, listing_id)
            .await?;
        let vote_count = self.vote_repo.count_by_listing(listing_id).await?;

        if removed {
            tracing::info!(
                user_id = %user_id,
                listing_id = %listing_id,
                vote_count = vote_count,
                "vote removed"
            );
        }

        Ok(VoteOutcome {
            voted: false,
            vote_count,
        })
    }

    /// Whether a user currently holds a vote on a listing.
    pub async fn has_voted(&self, user_id: &str, listing_id: &str) -> AppResult<bool> {
        self.vote_repo.has_voted(user_id, listing_id).await
    }

    /// Current vote count for a listing.
    pub async fn count(&self, listing_id: &str) -> AppResult<u64> {
        self.vote_repo.count_by_listing(listing_id).await
    }
}
