use super::BareResponse;
use alloc::sync::Arc;
use core::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::Utf8Error,
};
use url::Url;

/// An HTTP client error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HttpClientError {
    /// A body which failed to be read after its response head arrived.
    Body {
        /// A message.
        message: Arc<str>,
        /// A response without its body.
        response: Box<BareResponse>,
    },
    /// A body which failed to be decoded.
    Decode {
        /// A message.
        message: Arc<str>,
        /// A response with its undecoded body.
        response: Box<BareResponse>,
    },
    /// A request which failed before any response.
    Http(Arc<str>),
    /// An invalid header value.
    InvalidHeader(Arc<str>),
    /// A redirect to an unsupported scheme.
    RedirectScheme(Url),
    /// A timeout.
    Timeout(Arc<str>),
    /// Too many redirects.
    TooManyRedirects(Box<BareResponse>),
    /// A URL parse error.
    UrlParse(Arc<str>),
    /// An invalid UTF-8 sequence in a header.
    Utf8(Arc<str>),
}

impl HttpClientError {
    /// Returns a partial response received before the failure, if any.
    pub fn response(&self) -> Option<&BareResponse> {
        match self {
            Self::Body { response, .. }
            | Self::Decode { response, .. }
            | Self::TooManyRedirects(response) => Some(response),
            Self::Http(_)
            | Self::InvalidHeader(_)
            | Self::RedirectScheme(_)
            | Self::Timeout(_)
            | Self::UrlParse(_)
            | Self::Utf8(_) => None,
        }
    }
}

impl Error for HttpClientError {}

impl Display for HttpClientError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body { message, response } => {
                write!(formatter, "failed to read body from {}: {message}", response.url)
            }
            Self::Decode { message, response } => {
                write!(formatter, "failed to decode body from {}: {message}", response.url)
            }
            Self::Http(error) => write!(formatter, "{error}"),
            Self::InvalidHeader(error) => write!(formatter, "{error}"),
            Self::RedirectScheme(url) => write!(formatter, "unsupported redirect to {url}"),
            Self::Timeout(error) => write!(formatter, "{error}"),
            Self::TooManyRedirects(response) => {
                write!(formatter, "too many redirects at {}", response.url)
            }
            Self::UrlParse(error) => write!(formatter, "{error}"),
            Self::Utf8(error) => write!(formatter, "{error}"),
        }
    }
}

impl From<http::header::InvalidHeaderValue> for HttpClientError {
    fn from(error: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(error.to_string().into())
    }
}

impl From<tokio::time::error::Elapsed> for HttpClientError {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        Self::Timeout(error.to_string().into())
    }
}

impl From<url::ParseError> for HttpClientError {
    fn from(error: url::ParseError) -> Self {
        Self::UrlParse(error.to_string().into())
    }
}

impl From<Utf8Error> for HttpClientError {
    fn from(error: Utf8Error) -> Self {
        Self::Utf8(error.to_string().into())
    }
}
