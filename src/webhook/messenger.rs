//! The notification capability shared by every chat backend.

use std::sync::Arc;

use async_trait::async_trait;

/// A destination that can receive a plain-text notification.
///
/// Delivery is best effort: a backend reports success as a boolean and
/// logs its own failures. Nothing is retried here; the poller simply tries
/// again on the next tick because its state did not advance.
///
/// Backends are stored as trait objects in a
/// [`MessengerGroup`](super::MessengerGroup), hence `async_trait`.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Short service label used in logs and delivery reports.
    fn service_name(&self) -> &str;

    /// Whether the backend has a destination at all.
    ///
    /// An unconfigured backend still logs on every post, but its failure
    /// is permanent and does not count against
    /// [`DeliveryReport::all_succeeded`](super::DeliveryReport::all_succeeded).
    fn is_configured(&self) -> bool {
        true
    }

    /// Posts `message` and returns whether the service accepted it.
    async fn post_message(&self, message: &str) -> bool;
}

#[async_trait]
impl<M: Messenger + ?Sized> Messenger for Arc<M> {
    fn service_name(&self) -> &str {
        (**self).service_name()
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    async fn post_message(&self, message: &str) -> bool {
        (**self).post_message(message).await
    }
}
