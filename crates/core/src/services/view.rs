//! View service.

use termhunt_common::{AppResult, IdGenerator};
use termhunt_db::repositories::ViewEventRepository;

/// Service for the view counter.
#[derive(Clone)]
pub struct ViewService {
    view_repo: ViewEventRepository,
    id_gen: IdGenerator,
}

impl ViewService {
    /// Create a new view service.
    #[must_use]
    pub const fn new(view_repo: ViewEventRepository) -> Self {
        Self {
            view_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record one view of a listing.
    ///
    /// Every call counts: no de-duplication and no caller identity. Unknown
    /// listings are rejected by the event log's foreign key, so no event is
    /// recorded for them.
    pub async fn record(&self, listing_id: &str) -> AppResult<()> {
        let event_id = self.id_gen.generate();
        self.view_repo.record(&event_id, listing_id).await?;

        tracing::debug!(listing_id = %listing_id, "view recorded");

        Ok(())
    }
}
