//! Listing entity (a submitted terminal tool).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user who submitted this listing
    pub user_id: String,

    /// Tool name
    pub name: String,

    /// Short one-line description
    #[sea_orm(column_type = "Text", nullable)]
    pub tagline: Option<String>,

    /// Project homepage or repository URL
    #[sea_orm(nullable)]
    pub url: Option<String>,

    /// Denormalized view counter, kept in step with the view_event log
    #[sea_orm(default_value = 0)]
    pub view_count: i64,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,

    #[sea_orm(has_many = "super::view_event::Entity")]
    ViewEvents,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl Related<super::view_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ViewEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
