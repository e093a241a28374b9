use thiserror::Error;

use crate::types::coupon_types::Coupon;
use crate::types::draw_types::Draw;
use crate::types::user_types::User;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("User not found")]
    UserNotFound,
    #[error("Email is already registered")]
    EmailTaken,
    #[error("Coupon not found")]
    CouponNotFound,
    #[error("Draw {0} not found")]
    DrawNotFound(u64),
    #[error("Draw {0} has already taken place")]
    DrawCompleted(u64),
    #[error("A coupon must be assigned to at least one draw")]
    NoDraws,
    #[error("Lottery store is unavailable")]
    Unavailable,
}

/// Highest id ever handed out per collection. Ids are never reused, even
/// after the row that held them is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdWatermarks {
    pub user: u64,
    pub draw: u64,
    pub coupon: u64,
}

/// Everything the store holds, used to hydrate it from persistent storage.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub draws: Vec<Draw>,
    pub coupons: Vec<Coupon>,
    pub last_ids: IdWatermarks,
}
