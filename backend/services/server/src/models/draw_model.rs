use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone)]
pub struct DrawTable {
    pub id: i64,
    pub draw_date: DateTime<Utc>,
    pub winning_numbers: Option<Vec<i16>>,
    pub created_at: DateTime<Utc>,
}
