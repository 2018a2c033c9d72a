//! Vote repository.
//!
//! The toggle is the only write path that both reads and writes the ledger,
//! so it runs inside a single transaction with the (user_id, listing_id)
//! unique index as the backstop against concurrent double-toggles.

use std::sync::Arc;

use crate::entities::{Vote, vote};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use termhunt_common::{AppError, AppResult};

/// Vote repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a vote by user and listing.
    pub async fn find_by_user_and_listing(
        &self,
        user_id: &str,
        listing_id: &str,
    ) -> AppResult<Option<vote::Model>> {
        Vote::find()
            .filter(vote::Column::UserId.eq(user_id))
            .filter(vote::Column::ListingId.eq(listing_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has voted for a listing.
    pub async fn has_voted(&self, user_id: &str, listing_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_user_and_listing(user_id, listing_id)
            .await?
            .is_some())
    }

    /// Count votes on a listing.
    pub async fn count_by_listing(&self, listing_id: &str) -> AppResult<u64> {
        Vote::find()
            .filter(vote::Column::ListingId.eq(listing_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Toggle a vote in a single transaction.
    ///
    /// Inserts a vote row with the given id when none exists for the pair,
    /// deletes the existing row otherwise, then recounts the listing's votes
    /// before committing. Returns `(voted, vote_count)`.
    ///
    /// A concurrent toggle that wins the insert race surfaces here as
    /// `AppError::Conflict` (unique index violation); the caller retries.
    pub async fn toggle(
        &self,
        vote_id: &str,
        user_id: &str,
        listing_id: &str,
    ) -> AppResult<(bool, u64)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let existing = Vote::find()
            .filter(vote::Column::UserId.eq(user_id))
            .filter(vote::Column::ListingId.eq(listing_id))
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let voted = match existing {
            Some(v) => {
                v.delete(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                false
            }
            None => {
                let model = vote::ActiveModel {
                    id: Set(vote_id.to_string()),
                    user_id: Set(user_id.to_string()),
                    listing_id: Set(listing_id.to_string()),
                    created_at: Set(chrono::Utc::now().into()),
                };
                model.insert(&txn).await.map_err(|e| match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        AppError::Conflict("Vote already exists for this listing".to_string())
                    }
                    Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                        AppError::ListingNotFound(listing_id.to_string())
                    }
                    _ => AppError::Database(e.to_string()),
                })?;
                true
            }
        };

        let count = Vote::find()
            .filter(vote::Column::ListingId.eq(listing_id))
            .count(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((voted, count))
    }

    /// Delete a vote by user and listing. Returns whether a row was deleted.
    pub async fn delete_by_user_and_listing(
        &self,
        user_id: &str,
        listing_id: &str,
    ) -> AppResult<bool> {
        let result = Vote::delete_many()
            .filter(vote::Column::UserId.eq(user_id))
            .filter(vote::Column::ListingId.eq(listing_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_vote(id: &str, user_id: &str, listing_id: &str) -> vote::Model {
        vote::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            listing_id: listing_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_user_and_listing() {
        let vote = create_test_vote("vote1", "user1", "listing1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[vote.clone()]])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo
            .find_by_user_and_listing("user1", "listing1")
            .await
            .unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "vote1");
    }

    #[tokio::test]
    async fn test_has_voted_true() {
        let vote = create_test_vote("vote1", "user1", "listing1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[vote.clone()]])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo.has_voted("user1", "listing1").await.unwrap();

        assert!(result);
    }

    #[tokio::test]
    async fn test_has_voted_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<vote::Model>::new()])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo.has_voted("user1", "listing1").await.unwrap();

        assert!(!result);
    }

    #[tokio::test]
    async fn test_count_by_listing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(7))
                }]])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let count = repo.count_by_listing("listing1").await.unwrap();

        assert_eq!(count, 7);
    }

    #[tokio::test]
    async fn test_toggle_on_inserts_vote() {
        let vote = create_test_vote("vote1", "user1", "listing1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // No existing vote for the pair
                .append_query_results([Vec::<vote::Model>::new()])
                // Insert returns the new row
                .append_query_results([[vote.clone()]])
                // Recount inside the transaction
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(1))
                }]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let (voted, count) = repo.toggle("vote1", "user1", "listing1").await.unwrap();

        assert!(voted);
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_toggle_off_deletes_vote() {
        let vote = create_test_vote("vote1", "user1", "listing1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // Existing vote for the pair
                .append_query_results([[vote.clone()]])
                // Recount after the delete
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(0))
                }]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let (voted, count) = repo.toggle("vote2", "user1", "listing1").await.unwrap();

        assert!(!voted);
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_delete_by_user_and_listing_deleted() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let deleted = repo
            .delete_by_user_and_listing("user1", "listing1")
            .await
            .unwrap();

        assert!(deleted);
    }

    #[tokio::test]
    async fn test_delete_by_user_and_listing_no_vote() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let deleted = repo
            .delete_by_user_and_listing("user1", "listing1")
            .await
            .unwrap();

        assert!(!deleted);
    }
}
