//! Discord webhook backend.

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use super::delivery::post_json;
use super::{HttpClient, Messenger};

/// Posts notifications to a Discord channel webhook.
///
/// The message is prefixed with a `# Message from <host>` heading and sent
/// as `{"content": ...}`.
#[derive(Debug, Clone)]
pub struct DiscordMessenger<H> {
    client: H,
    host: String,
    endpoint: Option<Url>,
}

#[derive(Serialize)]
struct DiscordPayload {
    content: String,
}

impl<H> DiscordMessenger<H> {
    /// Service label used in logs and reports.
    pub const SERVICE: &'static str = "discord";

    /// Creates a Discord messenger. See [`SlackMessenger::new`](super::SlackMessenger::new).
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

    fn content(&self, message: &str) -> String {
        format!("# Message from {}\n{message}", self.host)
    }
}

#[async_trait]
impl<H: HttpClient> Messenger for DiscordMessenger<H> {
    fn service_name(&self) -> &str {
        Self::SERVICE
    }

    fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn post_message(&self, message: &str) -> bool {
        let payload = DiscordPayload {
            content: self.content(message),
        };
        post_json(&self.client, "Discord", self.endpoint.as_ref(), &payload).await
    }
}
