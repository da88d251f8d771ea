//! Single-attempt JSON POST shared by the chat backends.

use serde::Serialize;
use url::Url;

use super::{HttpClient, HttpRequest};

/// Posts `payload` as JSON to `endpoint`, returning true on a 2xx answer.
///
/// A missing endpoint fails without touching the network.
pub(super) async fn post_json<H, P>(
    client: &H,
    service: &str,
    endpoint: Option<&Url>,
    payload: &P,
) -> bool
where
    H: HttpClient,
    P: Serialize + Sync,
{
    let Some(url) = endpoint else {
        tracing::error!("{service} webhook URL is not configured.");
        return false;
    };

    let request = match HttpRequest::json(url.clone(), payload) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Failed to encode {service} payload: {e}");
            return false;
        }
    };

    match client.request(request).await {
        Ok(response) if response.is_success() => {
            tracing::info!("Message posted to {service} successfully.");
            true
        }
        Ok(response) => {
            tracing::error!(
                "Failed to post message to {service}. Status code: {}, Response: {}",
                response.status,
                response.body_text()
            );
            false
        }
        Err(e) => {
            tracing::error!("Error while posting to {service}: {e}");
            false
        }
    }
}
