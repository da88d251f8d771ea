//! Fan-out of one message to every registered backend.

use super::Messenger;

/// An ordered collection of messengers that all receive the same message.
#[derive(Default)]
pub struct MessengerGroup {
    messengers: Vec<Box<dyn Messenger>>,
}

impl std::fmt::Debug for MessengerGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.messengers.iter().map(|m| m.service_name()))
            .finish()
    }
}

impl MessengerGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a messenger. Messages are delivered in registration order.
    pub fn add(&mut self, messenger: impl Messenger + 'static) {
        self.messengers.push(Box::new(messenger));
    }

    /// Builder-style variant of [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, messenger: impl Messenger + 'static) -> Self {
        self.add(messenger);
        self
    }

    /// Number of registered messengers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messengers.len()
    }

    /// Returns true if no messenger is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messengers.is_empty()
    }

    /// Service names in registration order.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.messengers.iter().map(|m| m.service_name())
    }

    /// Sends `message` to every messenger, one after another.
    ///
    /// A failing backend never prevents the others from being tried.
    pub async fn post_message(&self, message: &str) -> DeliveryReport {
        let mut outcomes = Vec::with_capacity(self.messengers.len());
        for messenger in &self.messengers {
            let delivered = messenger.post_message(message).await;
            outcomes.push(Outcome {
                service: messenger.service_name().to_string(),
                delivered,
                configured: messenger.is_configured(),
            });
        }
        DeliveryReport { outcomes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Outcome {
    service: String,
    delivered: bool,
    configured: bool,
}

/// Per-service outcome of one fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    outcomes: Vec<Outcome>,
}

impl DeliveryReport {
    /// Outcome for `service`, or `None` if it was not part of the fan-out.
    #[must_use]
    pub fn get(&self, service: &str) -> Option<bool> {
        self.outcomes
            .iter()
            .find(|o| o.service == service)
            .map(|o| o.delivered)
    }

    /// True if at least one configured service was tried and every
    /// configured one succeeded. Services without a URL are ignored.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        let mut configured = self.outcomes.iter().filter(|o| o.configured).peekable();
        configured.peek().is_some() && configured.all(|o| o.delivered)
    }

    /// True if any service accepted the message.
    #[must_use]
    pub fn any_succeeded(&self) -> bool {
        self.outcomes.iter().any(|o| o.delivered)
    }

    /// Names of services that rejected the message, configured or not.
    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| !o.delivered)
            .map(|o| o.service.as_str())
    }

    /// Names of services that have no URL.
    pub fn unconfigured(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| !o.configured)
            .map(|o| o.service.as_str())
    }

    /// All `(service, delivered)` pairs in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.outcomes
            .iter()
            .map(|o| (o.service.as_str(), o.delivered))
    }

    /// Number of services tried.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if no service was tried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
