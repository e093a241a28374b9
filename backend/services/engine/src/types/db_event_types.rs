use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A committed change to the lottery store, in the shape persistence needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum DbEvent {
    #[serde(rename = "user_created")]
    UserCreated(UserCreatedEvent),
    #[serde(rename = "user_updated")]
    UserUpdated(UserUpdatedEvent),
    #[serde(rename = "user_deleted")]
    UserDeleted(UserDeletedEvent),
    #[serde(rename = "draw_created")]
    DrawCreated(DrawCreatedEvent),
    #[serde(rename = "draw_updated")]
    DrawUpdated(DrawUpdatedEvent),
    #[serde(rename = "draw_deleted")]
    DrawDeleted(DrawDeletedEvent),
    #[serde(rename = "coupon_created")]
    CouponCreated(CouponWrittenEvent),
    #[serde(rename = "coupon_updated")]
    CouponUpdated(CouponWrittenEvent),
    #[serde(rename = "coupon_deleted")]
    CouponDeleted(CouponDeletedEvent),
}

impl DbEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DbEvent::UserCreated(_) => "user_created",
            DbEvent::UserUpdated(_) => "user_updated",
            DbEvent::UserDeleted(_) => "user_deleted",
            DbEvent::DrawCreated(_) => "draw_created",
            DbEvent::DrawUpdated(_) => "draw_updated",
            DbEvent::DrawDeleted(_) => "draw_deleted",
            DbEvent::CouponCreated(_) => "coupon_created",
            DbEvent::CouponUpdated(_) => "coupon_updated",
            DbEvent::CouponDeleted(_) => "coupon_deleted",
        }
    }
}

/// Receives every committed store change from inside the store's command
/// loop, so events arrive in the order the changes were applied.
pub trait DbEventSink: Send + 'static {
    fn publish(&self, event: DbEvent);
}

/// Sink for stores that are not persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardEvents;

impl DbEventSink for DiscardEvents {
    fn publish(&self, _event: DbEvent) {}
}

impl DbEventSink for mpsc::UnboundedSender<DbEvent> {
    fn publish(&self, event: DbEvent) {
        if let Err(e) = self.send(event) {
            error!("Dropped {} event: receiver closed", e.0.name());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreatedEvent {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdatedEvent {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeletedEvent {
    pub user_id: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCreatedEvent {
    pub draw_id: u64,
    pub draw_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawUpdatedEvent {
    pub draw_id: u64,
    pub draw_date: DateTime<Utc>,
    pub winning_numbers: Option<Vec<u8>>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawDeletedEvent {
    pub draw_id: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponWrittenEvent {
    pub coupon_id: u64,
    pub user_id: u64,
    pub numbers: Vec<u8>,
    pub draw_ids: Vec<u64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponDeletedEvent {
    pub coupon_id: u64,
    pub timestamp: DateTime<Utc>,
}
