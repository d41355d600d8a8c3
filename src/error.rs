use crate::http_client::{BareResponse, HttpClientError};
use core::{
    error,
    fmt::{self, Display, Formatter},
};
use http::StatusCode;

/// An error of [`WebClient`](crate::WebClient).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A response with a status other than 200.
    RequestFailed {
        /// A status code.
        status: StatusCode,
        /// A truncated body.
        detail: String,
    },
    /// A request which could not complete.
    Transport(HttpClientError),
}

impl Error {
    /// Returns a partial response received before a transport failure, if any.
    pub fn response(&self) -> Option<&BareResponse> {
        match self {
            Self::RequestFailed { .. } => None,
            Self::Transport(error) => error.response(),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::RequestFailed { .. } => None,
            Self::Transport(error) => Some(error),
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed { status, detail } => {
                write!(formatter, "request failed with {status}: {detail}")
            }
            Self::Transport(error) => write!(formatter, "{error}"),
        }
    }
}

impl From<HttpClientError> for Error {
    fn from(error: HttpClientError) -> Self {
        Self::Transport(error)
    }
}
