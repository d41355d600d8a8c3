use super::{BareHttpClient, BareResponse, HttpClientError};
use crate::request::Request;
use async_trait::async_trait;
use log::trace;
use reqwest::{Client, ClientBuilder, redirect::Policy};

/// An HTTP client based on [`reqwest`].
///
/// Redirects are not followed and bodies are returned as received.
#[derive(Debug)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates an HTTP client.
    pub fn new() -> Result<Self, HttpClientError> {
        Ok(Self {
            client: ClientBuilder::new().redirect(Policy::none()).build()?,
        })
    }
}

#[async_trait]
impl BareHttpClient for ReqwestHttpClient {
    async fn get(&self, request: &Request) -> Result<BareResponse, HttpClientError> {
        trace!("sending a request to {}", request.url());

        let response = self
            .client
            .execute(
                self.client
                    .get(request.url().clone())
                    .headers(request.headers().clone())
                    .build()?,
            )
            .await?;

        trace!("got {} response from {}", response.status(), request.url());

        let head = BareResponse::new(
            response.url().clone(),
            response.status(),
            response.headers().clone(),
            vec![],
        );

        match response.bytes().await {
            Ok(body) => Ok(BareResponse {
                body: body.to_vec(),
                ..head
            }),
            Err(error) => Err(HttpClientError::Body {
                message: error.to_string().into(),
                response: head.into(),
            }),
        }
    }
}

impl From<reqwest::Error> for HttpClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string().into())
        } else {
            Self::Http(error.to_string().into())
        }
    }
}
