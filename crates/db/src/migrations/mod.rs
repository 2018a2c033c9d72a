//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250815_000001_create_user_table;
mod m20250815_000002_create_listing_table;
mod m20250815_000003_create_vote_table;
mod m20250815_000004_create_view_event_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250815_000001_create_user_table::Migration),
            Box::new(m20250815_000002_create_listing_table::Migration),
            Box::new(m20250815_000003_create_vote_table::Migration),
            Box::new(m20250815_000004_create_view_event_table::Migration),
        ]
    }
}
