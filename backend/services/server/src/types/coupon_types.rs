use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::draw_types::DrawSummary;
use crate::types::user_types::UserSummary;

#[derive(Deserialize, Debug)]
pub struct PurchaseCouponInput {
    pub numbers: Vec<i64>,
    pub draw_ids: Vec<u64>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateCouponInput {
    pub numbers: Option<Vec<i64>>,
    pub user_id: Option<u64>,
    pub draw_ids: Option<Vec<u64>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CouponView {
    pub id: u64,
    pub user: Option<UserSummary>,
    pub numbers: Vec<u8>,
    pub draws: Vec<DrawSummary>,
    pub created_at: DateTime<Utc>,
}
