//! Lottery core: ticket validation, draw matching, prize tiers and the
//! actor-owned store of users, coupons and draws.

pub mod store;
pub mod types;

pub use store::lottery::{spawn_lottery_actor, spawn_lottery_actor_with_sink, LotteryStore};
pub use store::matching::match_numbers;
pub use store::prize::resolve_prize;
pub use store::results::ticket_results;
pub use store::validator::validate_numbers;
