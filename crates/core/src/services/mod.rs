//! Business logic services.

#![allow(missing_docs)]

pub mod leaderboard;
pub mod listing;
pub mod user;
pub mod view;
pub mod vote;

pub use leaderboard::{LeaderboardService, Signal, Window};
pub use listing::{CreateListingInput, ListingService, UpdateListingInput};
pub use user::UserService;
pub use view::ViewService;
pub use vote::{VoteOutcome, VoteService};
