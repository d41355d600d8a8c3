use crate::http_client::BareResponse;
use alloc::borrow::Cow;
use core::time::Duration;
use http::{HeaderMap, StatusCode};
use url::Url;

/// An HTTP response after middleware processing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    history: Vec<String>,
    duration: Duration,
}

impl Response {
    /// Creates a response from a bare one.
    pub fn from_bare(response: BareResponse, duration: Duration) -> Self {
        Self {
            url: response.url,
            status: response.status,
            headers: response.headers,
            body: response.body,
            history: response.history,
            duration,
        }
    }

    /// Returns a URL of the last request.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns a status code.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a body.
    #[allow(clippy::missing_const_for_fn)]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns a body as text.
    ///
    /// Bodies of textual responses are already re-encoded into UTF-8 by the
    /// transcoder. Invalid sequences left in other bodies are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns URLs redirected to, in visit order.
    ///
    /// It is empty if no redirect happened or if redirect tracking is off.
    pub fn redirect_history(&self) -> &[String] {
        &self.history
    }

    /// Returns a duration of the whole request.
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}
