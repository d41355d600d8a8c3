use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// An HTTP GET request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    url: Url,
    headers: HeaderMap,
}

impl Request {
    /// Creates a request.
    pub const fn new(url: Url, headers: HeaderMap) -> Self {
        Self { url, headers }
    }

    /// Returns a URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Sets a URL.
    pub fn set_url(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    /// Sets a header unless it is already present.
    pub fn set_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.entry(name).or_insert(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{ACCEPT_ENCODING, USER_AGENT};
    use pretty_assertions::assert_eq;

    #[test]
    fn keep_existing_header() {
        let request = Request::new(
            Url::parse("https://foo.com").unwrap(),
            [(ACCEPT_ENCODING, HeaderValue::from_static("identity"))]
                .into_iter()
                .collect(),
        )
        .set_default_header(ACCEPT_ENCODING, HeaderValue::from_static("gzip"))
        .set_default_header(USER_AGENT, HeaderValue::from_static("foo"));

        assert_eq!(request.headers()[ACCEPT_ENCODING], "identity");
        assert_eq!(request.headers()[USER_AGENT], "foo");
    }
}
