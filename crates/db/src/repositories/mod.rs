//! Database repositories.

pub mod leaderboard;
pub mod listing;
pub mod user;
pub mod view_event;
pub mod vote;

pub use leaderboard::{LeaderboardEntry, LeaderboardRepository};
pub use listing::ListingRepository;
pub use user::UserRepository;
pub use view_event::ViewEventRepository;
pub use vote::VoteRepository;
