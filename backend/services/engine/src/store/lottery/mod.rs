mod actor;
mod api;
mod commands;
mod state;

pub use actor::{spawn_lottery_actor, spawn_lottery_actor_with_sink};
pub use api::LotteryStore;
