use super::HttpClientError;
use crate::request::Request;
use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use url::Url;

/// A bare HTTP client.
///
/// It sends a request over the network once. It neither follows redirects
/// nor decodes bodies.
#[async_trait]
pub trait BareHttpClient: Send + Sync {
    /// Sends a GET request.
    async fn get(&self, request: &Request) -> Result<BareResponse, HttpClientError>;
}

/// A response of a bare HTTP client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BareResponse {
    /// A URL.
    pub url: Url,
    /// A status code.
    pub status: StatusCode,
    /// Headers.
    pub headers: HeaderMap,
    /// A body.
    pub body: Vec<u8>,
    /// URLs redirected to, in visit order.
    ///
    /// Each is kept as resolved from a `Location` header without
    /// normalization.
    pub history: Vec<String>,
}

impl BareResponse {
    /// Creates a response without redirect history.
    pub const fn new(url: Url, status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            url,
            status,
            headers,
            body,
            history: vec![],
        }
    }
}
