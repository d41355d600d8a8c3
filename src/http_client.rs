mod bare;
mod error;
mod reqwest;
#[cfg(test)]
mod stub;

#[cfg(test)]
pub use self::stub::{StubHttpClient, build_stub_response};
pub use self::{
    bare::{BareHttpClient, BareResponse},
    error::HttpClientError,
    reqwest::ReqwestHttpClient,
};
use crate::{
    middleware::{Middleware, Next},
    request::Request,
    response::Response,
    timer::Timer,
};
use core::time::Duration;
use http::HeaderMap;
use tokio::time::timeout;
use url::Url;

/// A full-featured HTTP client.
///
/// Every request carries the default headers and passes through the
/// middleware in order before reaching the bare client.
pub struct HttpClient {
    client: Box<dyn BareHttpClient>,
    middleware: Vec<Box<dyn Middleware>>,
    headers: HeaderMap,
    timeout: Duration,
    timer: Box<dyn Timer>,
}

impl HttpClient {
    /// Creates an HTTP client.
    pub fn new(
        client: Box<dyn BareHttpClient>,
        middleware: Vec<Box<dyn Middleware>>,
        headers: HeaderMap,
        timeout: Duration,
        timer: impl Timer + 'static,
    ) -> Self {
        Self {
            client,
            middleware,
            headers,
            timeout,
            timer: Box::new(timer),
        }
    }

    /// Returns default headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a timeout of a whole request including redirects.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[cfg(test)]
    pub(crate) const fn middleware_count(&self) -> usize {
        self.middleware.len()
    }

    /// Sends a GET request.
    pub async fn get(&self, url: &Url) -> Result<Response, HttpClientError> {
        let request = Request::new(url.clone(), self.headers.clone());
        let start = self.timer.now();
        let response = timeout(
            self.timeout,
            Next::new(&self.middleware, self.client.as_ref()).run(&request),
        )
        .await??;

        Ok(Response::from_bare(
            response,
            self.timer.now().duration_since(start),
        ))
    }
}
