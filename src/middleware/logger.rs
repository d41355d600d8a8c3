use super::{Middleware, Next};
use crate::{
    http_client::{BareResponse, HttpClientError},
    request::Request,
    timer::Timer,
};
use async_trait::async_trait;
use core::{fmt::Write, time::Duration};
use http::HeaderMap;
use log::debug;

/// A log message format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// One line per request.
    #[default]
    Short,
    /// Full requests and responses including headers and bodies.
    Debug,
}

impl LogFormat {
    fn format_response(
        self,
        request: &Request,
        response: &BareResponse,
        duration: Duration,
    ) -> String {
        match self {
            Self::Short => format!(
                "GET {} {} ({} bytes, {} ms)",
                request.url(),
                response.status.as_u16(),
                response.body.len(),
                duration.as_millis(),
            ),
            Self::Debug => {
                let mut message = format_request(request);

                message.push_str("<<<<<<<<\n");
                let _ = writeln!(
                    message,
                    "{} {}",
                    response.status.as_u16(),
                    response.status.canonical_reason().unwrap_or_default()
                );
                write_headers(&mut message, &response.headers);
                let _ = writeln!(message, "\n{}", String::from_utf8_lossy(&response.body));
                let _ = write!(message, "-------- {} ms", duration.as_millis());

                message
            }
        }
    }

    fn format_error(self, request: &Request, error: &HttpClientError, duration: Duration) -> String {
        match self {
            Self::Short => format!(
                "GET {} failed: {error} ({} ms)",
                request.url(),
                duration.as_millis()
            ),
            Self::Debug => {
                let mut message = format_request(request);

                let _ = write!(message, "-------- {} ms\n{error}", duration.as_millis());

                message
            }
        }
    }
}

fn format_request(request: &Request) -> String {
    let mut message = format!(">>>>>>>>\nGET {}\n", request.url());
    write_headers(&mut message, request.headers());
    message
}

fn write_headers(message: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let _ = writeln!(message, "{name}: {}", String::from_utf8_lossy(value.as_bytes()));
    }
}

/// A middleware logging requests and responses.
///
/// Messages are logged at the debug level under a configured target.
pub struct Logger {
    target: String,
    format: LogFormat,
    timer: Box<dyn Timer>,
}

impl Logger {
    /// Creates a logger.
    pub fn new(target: impl Into<String>, format: LogFormat, timer: impl Timer + 'static) -> Self {
        Self {
            target: target.into(),
            format,
            timer: Box::new(timer),
        }
    }

    /// Returns a log format.
    pub const fn format(&self) -> LogFormat {
        self.format
    }
}

#[async_trait]
impl Middleware for Logger {
    async fn handle(
        &self,
        request: &Request,
        next: Next<'_>,
    ) -> Result<BareResponse, HttpClientError> {
        let start = self.timer.now();
        let result = next.run(request).await;
        let duration = self.timer.now().duration_since(start);

        let message = match &result {
            Ok(response) => self.format.format_response(request, response, duration),
            Err(error) => self.format.format_error(request, error, duration),
        };
        debug!(target: self.target.as_str(), "{message}");

        result
    }
}
