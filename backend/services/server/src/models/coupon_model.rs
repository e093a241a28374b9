use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone)]
pub struct CouponTable {
    pub id: i64,
    pub user_id: i64,
    pub numbers: Vec<i16>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone)]
pub struct CouponDrawTable {
    pub coupon_id: i64,
    pub draw_id: i64,
}
