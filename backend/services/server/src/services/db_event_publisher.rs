use engine::types::db_event_types::{DbEvent, DbEventSink};
use log::{debug, error};
use tokio::sync::mpsc;

/// Hands committed store changes to the persistence consumer. The lottery
/// actor owns it and publishes from its command loop. Without a database the
/// publisher is disabled and events are dropped.
#[derive(Clone, Default)]
pub struct DbEventPublisher {
    tx: Option<mpsc::UnboundedSender<DbEvent>>,
}

impl DbEventPublisher {
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DbEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }
}

impl DbEventSink for DbEventPublisher {
    fn publish(&self, event: DbEvent) {
        let Some(tx) = &self.tx else {
            debug!("Persistence disabled, dropping {} event", event.name());
            return;
        };

        if let Err(e) = tx.send(event) {
            error!("Failed to publish {} event: consumer stopped", e.0.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use engine::types::db_event_types::UserDeletedEvent;

    fn event() -> DbEvent {
        DbEvent::UserDeleted(UserDeletedEvent {
            user_id: 3,
            timestamp: Utc::now(),
        })
    }

    #[tokio::test]
    async fn forwards_events_to_the_consumer() {
        let (publisher, mut rx) = DbEventPublisher::channel();
        publisher.publish(event());
        let received = rx.recv().await.unwrap();
        assert_eq!(received.name(), "user_deleted");
    }

    #[test]
    fn disabled_publisher_swallows_events() {
        DbEventPublisher::disabled().publish(event());
    }

    #[tokio::test]
    async fn store_writes_reach_the_consumer_in_order() {
        let (publisher, mut rx) = DbEventPublisher::channel();
        let store = engine::spawn_lottery_actor_with_sink(publisher);
        let draw = store.create_draw(Utc::now()).await.unwrap();
        store.delete_draw(draw.id).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().name(), "draw_created");
        assert_eq!(rx.recv().await.unwrap().name(), "draw_deleted");
    }
}
