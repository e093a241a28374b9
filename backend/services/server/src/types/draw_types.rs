use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct CreateDrawInput {
    pub draw_date: DateTime<Utc>,
}

/// Winning numbers arrive as raw integers so the ticket validator can report
/// exactly what is wrong with them.
#[derive(Deserialize, Debug)]
pub struct UpdateDrawInput {
    pub draw_date: Option<DateTime<Utc>>,
    pub winning_numbers: Option<Vec<i64>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DrawSummary {
    pub id: u64,
    pub draw_date: DateTime<Utc>,
    pub winning_numbers: Option<Vec<u8>>,
}
