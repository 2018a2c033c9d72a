//! Database entities.

pub mod listing;
pub mod user;
pub mod view_event;
pub mod vote;

pub use listing::Entity as Listing;
pub use user::Entity as User;
pub use view_event::Entity as ViewEvent;
pub use vote::Entity as Vote;
