mod logger;
mod redirect;
mod transcoder;

pub use self::{
    logger::{LogFormat, Logger},
    redirect::RedirectFollower,
    transcoder::Transcoder,
};
use crate::{
    http_client::{BareHttpClient, BareResponse, HttpClientError},
    request::Request,
};
use async_trait::async_trait;

/// A request/response stage wrapping the rest of a middleware chain.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Handles a request, calling the next stage zero or more times.
    async fn handle(
        &self,
        request: &Request,
        next: Next<'_>,
    ) -> Result<BareResponse, HttpClientError>;
}

/// The rest of a middleware chain ending with a bare client.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    middleware: &'a [Box<dyn Middleware>],
    client: &'a dyn BareHttpClient,
}

impl<'a> Next<'a> {
    /// Creates a chain.
    pub const fn new(middleware: &'a [Box<dyn Middleware>], client: &'a dyn BareHttpClient) -> Self {
        Self { middleware, client }
    }

    /// Runs a request through the chain.
    pub async fn run(self, request: &Request) -> Result<BareResponse, HttpClientError> {
        if let Some((middleware, rest)) = self.middleware.split_first() {
            middleware
                .handle(
                    request,
                    Self {
                        middleware: rest,
                        client: self.client,
                    },
                )
                .await
        } else {
            self.client.get(request).await
        }
    }
}
