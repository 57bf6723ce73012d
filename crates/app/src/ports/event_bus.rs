//! Event bus port — publish/subscribe for domain events.

use std::future::Future;
use std::sync::Arc;

use sprout_domain::error::SproutError;
use sprout_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), SproutError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), SproutError>> + Send {
        (**self).publish(event)
    }
}
