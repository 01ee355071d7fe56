//! In-process event bus.
//!
//! Subscribers are registered once at composition time; there is no runtime
//! discovery. Publishing is synchronous with respect to the write that
//! produced the event (the caller publishes only after its store commit) and
//! asynchronous with respect to the subscribers: `publish` hands the event to
//! a background dispatch and returns immediately.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DomainError;
use crate::event::DomainEvent;

/// A registered consumer of domain events.
#[async_trait]
pub trait EventSubscriber<E>: Send + Sync {
    /// Stable name used to attribute failures to a single subscriber.
    fn name(&self) -> &'static str;

    /// Handles one delivery of the event. Deliveries are at-least-once, so
    /// implementations must converge under redelivery.
    async fn handle(&self, event: &E) -> Result<(), DomainError>;
}

/// Explicit in-process event bus: a list of subscribers iterated on publish.
pub struct EventBus<E> {
    subscribers: Vec<Arc<dyn EventSubscriber<E>>>,
}

impl<E> EventBus<E> {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber. Registration order is not significant;
    /// deliveries are independent.
    pub fn subscribe(&mut self, subscriber: Arc<dyn EventSubscriber<E>>) {
        self.subscribers.push(subscriber);
    }
}

impl<E> EventBus<E>
where
    E: DomainEvent + Clone + Send + Sync + 'static,
{
    /// Publishes an event without awaiting its subscribers.
    pub fn publish(self: &Arc<Self>, event: E) {
        let bus = Arc::clone(self);
        tokio::spawn(async move {
            bus.dispatch(&event).await;
        });
    }

    /// Delivers the event to every subscriber, one task per subscriber, and
    /// waits for all deliveries to settle. A failure is logged with the
    /// subscriber's name and never prevents delivery to the others.
    pub async fn dispatch(&self, event: &E) {
        let mut deliveries = Vec::with_capacity(self.subscribers.len());
        for subscriber in &self.subscribers {
            let subscriber = Arc::clone(subscriber);
            let event = event.clone();
            let name = subscriber.name();
            let delivery = tokio::spawn(async move {
                if let Err(error) = subscriber.handle(&event).await {
                    tracing::error!(
                        subscriber = subscriber.name(),
                        event_type = event.event_type(),
                        event_id = %event.metadata().event_id,
                        %error,
                        "event subscriber failed"
                    );
                }
            });
            deliveries.push((name, delivery));
        }
        for (name, delivery) in deliveries {
            if delivery.await.is_err() {
                tracing::error!(subscriber = name, "event subscriber panicked");
            }
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.subscribers.iter().map(|s| s.name()).collect();
        f.debug_struct("EventBus")
            .field("subscribers", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::event::EventMetadata;

    #[derive(Debug, Clone)]
    struct PingEvent {
        metadata: EventMetadata,
    }

    impl DomainEvent for PingEvent {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn metadata(&self) -> &EventMetadata {
            &self.metadata
        }
    }

    fn ping() -> PingEvent {
        let correlation_id = Uuid::new_v4();
        PingEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                aggregate_id: Uuid::new_v4(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: Utc::now(),
            },
        }
    }

    struct RecordingSubscriber {
        name: &'static str,
        seen: Mutex<Vec<Uuid>>,
    }

    impl RecordingSubscriber {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<Uuid> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventSubscriber<PingEvent> for RecordingSubscriber {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn handle(&self, event: &PingEvent) -> Result<(), DomainError> {
            self.seen.lock().unwrap().push(event.metadata.event_id);
            Ok(())
        }
    }

    struct FailingSubscriber;

    #[async_trait]
    impl EventSubscriber<PingEvent> for FailingSubscriber {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn handle(&self, _event: &PingEvent) -> Result<(), DomainError> {
            Err(DomainError::Projection {
                store: "failing".to_owned(),
                message: "store unavailable".to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn test_dispatch_delivers_to_every_subscriber() {
        let first = RecordingSubscriber::new("first");
        let second = RecordingSubscriber::new("second");
        let mut bus: EventBus<PingEvent> = EventBus::new();
        bus.subscribe(first.clone());
        bus.subscribe(second.clone());

        let event = ping();
        bus.dispatch(&event).await;

        assert_eq!(first.seen(), vec![event.metadata.event_id]);
        assert_eq!(second.seen(), vec![event.metadata.event_id]);
    }

    #[tokio::test]
    async fn test_failing_subscriber_does_not_block_others() {
        let recording = RecordingSubscriber::new("recording");
        let mut bus: EventBus<PingEvent> = EventBus::new();
        bus.subscribe(Arc::new(FailingSubscriber));
        bus.subscribe(recording.clone());

        let event = ping();
        bus.dispatch(&event).await;

        assert_eq!(recording.seen(), vec![event.metadata.event_id]);
    }

    #[tokio::test]
    async fn test_publish_returns_before_delivery_and_still_delivers() {
        let recording = RecordingSubscriber::new("recording");
        let mut bus: EventBus<PingEvent> = EventBus::new();
        bus.subscribe(recording.clone());
        let bus = Arc::new(bus);

        let event = ping();
        let event_id = event.metadata.event_id;
        bus.publish(event);

        // Delivery happens on a background task; poll until it lands.
        for _ in 0..100 {
            if !recording.seen().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        assert_eq!(recording.seen(), vec![event_id]);
    }

    #[tokio::test]
    async fn test_redelivery_reaches_subscribers_each_time() {
        let recording = RecordingSubscriber::new("recording");
        let mut bus: EventBus<PingEvent> = EventBus::new();
        bus.subscribe(recording.clone());

        let event = ping();
        bus.dispatch(&event).await;
        bus.dispatch(&event).await;

        // At-least-once delivery: the bus does not deduplicate; convergence
        // is the subscribers' responsibility.
        assert_eq!(
            recording.seen(),
            vec![event.metadata.event_id, event.metadata.event_id]
        );
    }
}
