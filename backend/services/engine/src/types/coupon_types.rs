use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ticket_types::TicketNumbers;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: u64,
    pub user_id: u64,
    pub numbers: TicketNumbers,
    pub draw_ids: Vec<u64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CouponUpdate {
    pub numbers: Option<TicketNumbers>,
    pub user_id: Option<u64>,
    pub draw_ids: Option<Vec<u64>>,
}
