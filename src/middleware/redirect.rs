use super::{Middleware, Next};
use crate::{
    http_client::{BareResponse, HttpClientError},
    request::Request,
};
use async_trait::async_trait;
use core::str;
use http::{StatusCode, header::LOCATION};
use log::trace;
use url::Url;

const REDIRECT_STATUSES: &[StatusCode] = &[
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::FOUND,
    StatusCode::SEE_OTHER,
    StatusCode::TEMPORARY_REDIRECT,
    StatusCode::PERMANENT_REDIRECT,
];
const REDIRECT_SCHEMES: &[&str] = &["http", "https"];

/// A middleware following redirects.
#[derive(Debug)]
pub struct RedirectFollower {
    max_redirects: usize,
    track: bool,
}

impl RedirectFollower {
    /// Creates a redirect follower.
    ///
    /// If `track` is true, URLs redirected to are recorded in responses.
    pub const fn new(max_redirects: usize, track: bool) -> Self {
        Self {
            max_redirects,
            track,
        }
    }
}

#[async_trait]
impl Middleware for RedirectFollower {
    async fn handle(
        &self,
        request: &Request,
        next: Next<'_>,
    ) -> Result<BareResponse, HttpClientError> {
        let mut request = request.clone();
        let mut history = vec![];
        let mut count = 0;

        loop {
            let mut response = next.run(&request).await?;

            let Some((url, location)) = redirect_url(&response)? else {
                if self.track {
                    response.history = history;
                }

                return Ok(response);
            };

            if count >= self.max_redirects {
                return Err(HttpClientError::TooManyRedirects(response.into()));
            } else if !REDIRECT_SCHEMES.contains(&url.scheme()) {
                return Err(HttpClientError::RedirectScheme(url));
            }

            trace!("following a redirect from {} to {location}", request.url());

            count += 1;

            if self.track {
                history.push(location);
            }

            request = request.set_url(url);
        }
    }
}

// A resolved location is kept verbatim when it is absolute.
fn redirect_url(response: &BareResponse) -> Result<Option<(Url, String)>, HttpClientError> {
    if !REDIRECT_STATUSES.contains(&response.status) {
        return Ok(None);
    }

    let Some(location) = response.headers.get(LOCATION) else {
        return Ok(None);
    };
    let location = str::from_utf8(location.as_bytes())?.trim();

    Ok(Some(match Url::parse(location) {
        Ok(url) => (url, location.to_owned()),
        Err(_) => {
            let url = response.url.join(location)?;
            let location = url.as_str().to_owned();

            (url, location)
        }
    }))
}
