//! Leaderboard service.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use termhunt_common::AppResult;
use termhunt_db::repositories::{LeaderboardEntry, LeaderboardRepository};

/// Default number of entries returned when the caller names no limit.
const DEFAULT_LIMIT: u64 = 10;

/// Largest leaderboard a single call may request.
const MAX_LIMIT: u64 = 100;

/// Time window a leaderboard is computed over.
///
/// The bounded windows are fixed-duration lookbacks from the moment of the
/// call, not calendar periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    AllTime,
}

impl Window {
    /// Start instant of the window, measured back from `now`. `None` means
    /// no lower bound.
    #[must_use]
    pub fn since(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Daily => Some(now - Duration::days(1)),
            Self::Weekly => Some(now - Duration::days(7)),
            Self::Monthly => Some(now - Duration::days(30)),
            Self::Yearly => Some(now - Duration::days(365)),
            Self::AllTime => None,
        }
    }
}

/// Signal a leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Votes,
    Views,
}

/// Service computing ranked listings from the vote and view logs.
#[derive(Clone)]
pub struct LeaderboardService {
    leaderboard_repo: LeaderboardRepository,
}

impl LeaderboardService {
    /// Create a new leaderboard service.
    #[must_use]
    pub const fn new(leaderboard_repo: LeaderboardRepository) -> Self {
        Self { leaderboard_repo }
    }

    /// Compute the leaderboard for a window and signal.
    ///
    /// Entries are ordered by count descending; equal counts rank the
    /// smaller listing id first (ids are ULIDs, so the older listing wins).
    /// An empty window yields an empty vector.
    pub async fn compute(
        &self,
        window: Window,
        signal: Signal,
        limit: Option<u64>,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        let limit = effective_limit(limit);
        let since = window.since(Utc::now());

        match signal {
            Signal::Votes => self.leaderboard_repo.top_by_votes(since, limit).await,
            Signal::Views => self.leaderboard_repo.top_by_views(since, limit).await,
        }
    }
}

/// Clamp a requested limit into 1..=`MAX_LIMIT`, defaulting when absent.
fn effective_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}
