use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ticket_types::TicketNumbers;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub id: u64,
    pub draw_date: DateTime<Utc>,
    pub winning_numbers: Option<TicketNumbers>,
    pub created_at: DateTime<Utc>,
}

impl Draw {
    pub fn is_completed(&self) -> bool {
        self.winning_numbers.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawUpdate {
    pub draw_date: Option<DateTime<Utc>>,
    pub winning_numbers: Option<TicketNumbers>,
}
