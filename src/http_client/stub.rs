use crate::http_client::{BareHttpClient, BareResponse, HttpClientError};
use crate::request::Request;
use alloc::sync::Arc;
use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use scc::HashMap;
use std::sync::Mutex;
use url::Url;

/// A stub client answering canned results by URL.
#[derive(Clone, Debug, Default)]
pub struct StubHttpClient {
    results: Arc<HashMap<String, Result<BareResponse, HttpClientError>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl StubHttpClient {
    pub fn new(results: HashMap<String, Result<BareResponse, HttpClientError>>) -> Self {
        Self {
            results: results.into(),
            requests: Default::default(),
        }
    }

    /// Returns requests received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BareHttpClient for StubHttpClient {
    async fn get(&self, request: &Request) -> Result<BareResponse, HttpClientError> {
        self.requests.lock().unwrap().push(request.clone());

        self.results
            .get_async(request.url().as_str())
            .await
            .expect("stub response")
            .get()
            .clone()
    }
}

pub fn build_stub_response(
    url: &str,
    status: StatusCode,
    headers: HeaderMap,
    body: &[u8],
) -> (String, Result<BareResponse, HttpClientError>) {
    let url = Url::parse(url).unwrap();

    (
        url.as_str().into(),
        Ok(BareResponse::new(url, status, headers, body.to_vec())),
    )
}
