//! Listing service.

use chrono::Utc;
use serde::Deserialize;
use termhunt_common::{AppError, AppResult, id::IdGenerator};
use termhunt_db::entities::{listing, user};
use termhunt_db::repositories::ListingRepository;
use sea_orm::Set;
use validator::Validate;

/// Input for submitting a listing.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(max = 256))]
    pub tagline: Option<String>,
    #[validate(length(max = 512))]
    pub url: Option<String>,
}

/// Input for updating a listing.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingInput {
    pub listing_id: String,
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 256))]
    pub tagline: Option<Option<String>>,
    #[validate(length(max = 512))]
    pub url: Option<Option<String>>,
}

/// Service for managing the listing directory.
#[derive(Clone)]
pub struct ListingService {
    listing_repo: ListingRepository,
    id_gen: IdGenerator,
}

impl ListingService {
    /// Create a new listing service.
    #[must_use]
    pub const fn new(listing_repo: ListingRepository) -> Self {
        Self {
            listing_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Get a listing by ID, erroring when absent.
    pub async fn get(&self, listing_id: &str) -> AppResult<listing::Model> {
        self.listing_repo.get_by_id(listing_id).await
    }

    /// Find a listing by ID.
    pub async fn find(&self, listing_id: &str) -> AppResult<Option<listing::Model>> {
        self.listing_repo.find_by_id(listing_id).await
    }

    /// List listings newest first, paginating with an id cursor.
    pub async fn list(&self, limit: u64, until_id: Option<&str>) -> AppResult<Vec<listing::Model>> {
        self.listing_repo.find_all(limit, until_id).await
    }

    /// Submit a new listing.
    pub async fn create(
        &self,
        user_id: &str,
        input: CreateListingInput,
    ) -> AppResult<listing::Model> {
        input.validate()?;

        let id = self.id_gen.generate();
        let now = Utc::now();

        let model = listing::ActiveModel {
            id: Set(id),
            user_id: Set(user_id.to_string()),
            name: Set(input.name),
            tagline: Set(input.tagline),
            url: Set(input.url),
            view_count: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let listing = self.listing_repo.create(model).await?;

        tracing::info!(
            listing_id = %listing.id,
            user_id = %user_id,
            name = %listing.name,
            "listing created"
        );

        Ok(listing)
    }

    /// Update a listing. Only the creator or an admin may edit.
    pub async fn update(
        &self,
        actor: &user::Model,
        input: UpdateListingInput,
    ) -> AppResult<listing::Model> {
        input.validate()?;

        let listing = self.get_for_editor(&input.listing_id, actor).await?;

        let now = Utc::now();
        let mut active: listing::ActiveModel = listing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(tagline) = input.tagline {
            active.tagline = Set(tagline);
        }
        if let Some(url) = input.url {
            active.url = Set(url);
        }

        active.updated_at = Set(Some(now.into()));

        self.listing_repo.update(active).await
    }

    /// Delete a listing. Only the creator or an admin may delete; the
    /// listing's votes and view events go with it.
    pub async fn delete(&self, actor: &user::Model, listing_id: &str) -> AppResult<()> {
        self.get_for_editor(listing_id, actor).await?;
        self.listing_repo.delete(listing_id).await?;

        tracing::info!(listing_id = %listing_id, actor_id = %actor.id, "listing deleted");

        Ok(())
    }

    /// Get a listing with an edit-permission check.
    async fn get_for_editor(
        &self,
        listing_id: &str,
        actor: &user::Model,
    ) -> AppResult<listing::Model> {
        let listing = self.listing_repo.get_by_id(listing_id).await?;

        if listing.user_id != actor.id && !actor.is_admin {
            return Err(AppError::Forbidden("Not the listing creator".to_string()));
        }

        Ok(listing)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_listing(id: &str, user_id: &str, name: &str) -> listing::Model {
        listing::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            tagline: Some("Fuzzy finder for the terminal".to_string()),
            url: Some("https://example.com/tool".to_string()),
            view_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_user(id: &str, username: &str, is_admin: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            display_name: None,
            api_token: Some(format!("token-{username}")),
            is_admin,
            created_at: Utc::now().into(),
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> ListingService {
        ListingService::new(ListingRepository::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_create_listing() {
        let created = create_test_listing("listing1", "user1", "fzf");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[created.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);

        let input = CreateListingInput {
            name: "fzf".to_string(),
            tagline: Some("Fuzzy finder for the terminal".to_string()),
            url: Some("https://example.com/tool".to_string()),
        };

        let result = service.create("user1", input).await.unwrap();

        assert_eq!(result.name, "fzf");
        assert_eq!(result.view_count, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let input = CreateListingInput {
            name: "x".repeat(129),
            tagline: None,
            url: None,
        };

        let result = service.create("user1", input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let input = CreateListingInput {
            name: String::new(),
            tagline: None,
            url: None,
        };

        let result = service.create("user1", input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<listing::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let result = service.get("missing").await;

        assert!(matches!(result, Err(AppError::ListingNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_by_creator() {
        let listing = create_test_listing("listing1", "user1", "fzf");
        let mut updated = listing.clone();
        updated.name = "fzf (fork)".to_string();
        updated.updated_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![listing], vec![updated]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        let actor = create_test_user("user1", "alice", false);

        let input = UpdateListingInput {
            listing_id: "listing1".to_string(),
            name: Some("fzf (fork)".to_string()),
            tagline: None,
            url: None,
        };

        let result = service.update(&actor, input).await.unwrap();

        assert_eq!(result.name, "fzf (fork)");
        assert!(result.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_clears_tagline() {
        let listing = create_test_listing("listing1", "user1", "fzf");
        let mut updated = listing.clone();
        updated.tagline = None;
        updated.updated_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![listing], vec![updated]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        let actor = create_test_user("user1", "alice", false);

        let input = UpdateListingInput {
            listing_id: "listing1".to_string(),
            name: None,
            tagline: Some(None),
            url: None,
        };

        let result = service.update(&actor, input).await.unwrap();

        assert!(result.tagline.is_none());
    }

    #[tokio::test]
    async fn test_update_forbidden_for_stranger() {
        let listing = create_test_listing("listing1", "user1", "fzf");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[listing]])
            .into_connection();

        let service = service_with(db);
        let actor = create_test_user("user2", "mallory", false);

        let input = UpdateListingInput {
            listing_id: "listing1".to_string(),
            name: Some("hijacked".to_string()),
            tagline: None,
            url: None,
        };

        let result = service.update(&actor, input).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_by_admin() {
        let listing = create_test_listing("listing1", "user1", "fzf");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[listing]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        let admin = create_test_user("user9", "root", true);

        let result = service.delete(&admin, "listing1").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_forbidden_for_stranger() {
        let listing = create_test_listing("listing1", "user1", "fzf");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[listing]])
            .into_connection();

        let service = service_with(db);
        let actor = create_test_user("user2", "mallory", false);

        let result = service.delete(&actor, "listing1").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
