//! Leaderboard repository.
//!
//! Ranking reads are raw SQL: group an event table (votes or view events) by
//! listing, count, and join listing name + creator handle in one round trip.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};
use termhunt_common::{AppError, AppResult};

/// One leaderboard row: a listing and its event count for the queried window.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct LeaderboardEntry {
    /// The ranked listing.
    pub listing_id: String,
    /// Listing name at query time.
    pub name: String,
    /// Username of the listing's creator.
    pub creator_handle: String,
    /// Number of qualifying events in the window.
    pub count: i64,
}

/// Leaderboard repository for aggregation queries.
#[derive(Clone)]
pub struct LeaderboardRepository {
    db: Arc<DatabaseConnection>,
}

impl LeaderboardRepository {
    /// Create a new leaderboard repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Top listings by vote count since the given instant (no bound = all time).
    pub async fn top_by_votes(
        &self,
        since: Option<chrono::DateTime<chrono::Utc>>,
        limit: u64,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        self.top_for_table("vote", since, limit).await
    }

    /// Top listings by view count since the given instant (no bound = all time).
    pub async fn top_by_views(
        &self,
        since: Option<chrono::DateTime<chrono::Utc>>,
        limit: u64,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        self.top_for_table("view_event", since, limit).await
    }

    /// Shared aggregation over one of the two event tables.
    ///
    /// Ties rank by ascending listing id: ids are ULIDs, so equal counts put
    /// the older listing first, and identical inputs always produce the same
    /// order.
    async fn top_for_table(
        &self,
        event_table: &str,
        since: Option<chrono::DateTime<chrono::Utc>>,
        limit: u64,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        let stmt = match since {
            Some(since) => Statement::from_sql_and_values(
                DbBackend::Postgres,
                format!(
                    r#"
                    SELECT
                        e.listing_id AS listing_id,
                        l.name AS name,
                        u.username AS creator_handle,
                        COUNT(e.id) AS count
                    FROM {event_table} e
                    INNER JOIN listing l ON l.id = e.listing_id
                    INNER JOIN "user" u ON u.id = l.user_id
                    WHERE e.created_at >= $1
                    GROUP BY e.listing_id, l.name, u.username
                    ORDER BY count DESC, listing_id ASC
                    LIMIT $2
                    "#
                ),
                [since.into(), (limit as i64).into()],
            ),
            None => Statement::from_sql_and_values(
                DbBackend::Postgres,
                format!(
                    r#"
                    SELECT
                        e.listing_id AS listing_id,
                        l.name AS name,
                        u.username AS creator_handle,
                        COUNT(e.id) AS count
                    FROM {event_table} e
                    INNER JOIN listing l ON l.id = e.listing_id
                    INNER JOIN "user" u ON u.id = l.user_id
                    GROUP BY e.listing_id, l.name, u.username
                    ORDER BY count DESC, listing_id ASC
                    LIMIT $1
                    "#
                ),
                [(limit as i64).into()],
            ),
        };

        LeaderboardEntry::find_by_statement(stmt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
