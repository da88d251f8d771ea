//! Slack incoming-webhook backend.

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use super::delivery::post_json;
use super::{HttpClient, Messenger};

/// Posts notifications to a Slack workflow webhook.
///
/// The workflow receives the host label and the message as separate
/// variables: `{"host": ..., "msg": ...}`.
#[derive(Debug, Clone)]
pub struct SlackMessenger<H> {
    client: H,
    host: String,
    endpoint: Option<Url>,
}

#[derive(Serialize)]
struct SlackPayload<'a> {
    host: &'a str,
    msg: &'a str,
}

impl<H> SlackMessenger<H> {
    /// Service label used in logs and reports.
    pub const SERVICE: &'static str = "slack";

    /// Creates a Slack messenger.
    ///
    /// `endpoint` is `None` when the secret exists but is empty; every post
    /// then fails with a configuration error.
    #[must_use]
    pub fn new(client: H, host: impl Into<String>, endpoint: Option<Url>) -> Self {
        Self {
            client,
            host: host.into(),
            endpoint,
        }
    }

    /// Returns the configured webhook URL, if any.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }
}

#[async_trait]
impl<H: HttpClient> Messenger for SlackMessenger<H> {
    fn service_name(&self) -> &str {
        Self::SERVICE
    }

    fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn post_message(&self, message: &str) -> bool {
        let payload = SlackPayload {
            host: &self.host,
            msg: message,
        };
        post_json(&self.client, "Slack", self.endpoint.as_ref(), &payload).await
    }
}
