use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ticket_types::TicketNumbers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub status: MatchStatus,
    pub matched: Option<u8>,
}

impl MatchOutcome {
    pub fn pending() -> Self {
        Self {
            status: MatchStatus::Pending,
            matched: None,
        }
    }

    pub fn settled(matched: u8) -> Self {
        Self {
            status: MatchStatus::Settled,
            matched: Some(matched),
        }
    }
}

/// One row of a ticket's result sheet: how the ticket fared in one draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub draw_id: u64,
    pub draw_date: DateTime<Utc>,
    pub user_numbers: TicketNumbers,
    pub winning_numbers: Option<TicketNumbers>,
    pub matched_numbers: Option<u8>,
    pub status: MatchStatus,
    pub prize: Option<u64>,
}
