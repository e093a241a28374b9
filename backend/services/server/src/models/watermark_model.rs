use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone)]
pub struct IdWatermarkTable {
    pub entity: String,
    pub last_id: i64,
}
