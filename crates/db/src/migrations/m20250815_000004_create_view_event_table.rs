//! Create view event table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ViewEvent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ViewEvent::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ViewEvent::ListingId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(ViewEvent::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_view_event_listing")
                            .from(ViewEvent::Table, ViewEvent::ListingId)
                            .to(Listing::Table, Listing::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: listing_id (for counting views on a listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_view_event_listing_id")
                    .table(ViewEvent::Table)
                    .col(ViewEvent::ListingId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for leaderboard window scans)
        manager
            .create_index(
                Index::create()
                    .name("idx_view_event_created_at")
                    .table(ViewEvent::Table)
                    .col(ViewEvent::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ViewEvent::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ViewEvent {
    Table,
    Id,
    ListingId,
    CreatedAt,
}

#[derive(Iden)]
enum Listing {
    Table,
    Id,
}
