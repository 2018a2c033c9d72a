//! View event repository.

use std::sync::Arc;

use crate::entities::{Listing, listing, view_event};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
    TransactionTrait, sea_query::Expr,
};
use termhunt_common::{AppError, AppResult};

/// View event repository for database operations.
#[derive(Clone)]
pub struct ViewEventRepository {
    db: Arc<DatabaseConnection>,
}

impl ViewEventRepository {
    /// Create a new view event repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record one view in a single transaction.
    ///
    /// Appends a `view_event` row with the given id and increments the
    /// listing's denormalized `view_count` by 1. Both writes commit together,
    /// so the log and the counter cannot drift apart through this path.
    pub async fn record(&self, event_id: &str, listing_id: &str) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let model = view_event::ActiveModel {
            id: Set(event_id.to_string()),
            listing_id: Set(listing_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        model.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::ListingNotFound(listing_id.to_string())
            }
            _ => AppError::Database(e.to_string()),
        })?;

        Listing::update_many()
            .col_expr(
                listing::Column::ViewCount,
                Expr::col(listing::Column::ViewCount).add(1),
            )
            .filter(listing::Column::Id.eq(listing_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
