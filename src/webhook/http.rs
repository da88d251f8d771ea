//! Request and response values exchanged with an [`HttpClient`].

use std::borrow::Cow;

use serde::Serialize;

use super::HttpError;

/// An outgoing webhook call.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// A bodiless POST to `url`.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self {
            method: http::Method::POST,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// A POST to `url` carrying `payload` as its JSON body.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `payload` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(url: url::Url, payload: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(payload)?;
        let mut request = Self::post(url);
        request.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        request.body = Some(body);
        Ok(request)
    }
}

/// A buffered webhook answer.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Whether the webhook accepted the call (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Sends webhook calls.
///
/// Messengers are generic over this trait so tests can inject a client
/// that records requests and returns canned responses.
pub trait HttpClient: Send + Sync {
    /// Sends `req` and buffers the answer.
    ///
    /// Non-2xx responses are returned as `Ok`; only transport problems are errors.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the connection fails, the request times
    /// out, or the request cannot be built.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
