use crate::{
    config::Settings,
    error::Error,
    http_client::{BareHttpClient, HttpClient, HttpClientError, ReqwestHttpClient},
    middleware::{LogFormat, Logger, Middleware, RedirectFollower, Transcoder},
    response::Response,
    timer::ClockTimer,
    user_agent::user_agent,
};
use http::{HeaderMap, HeaderValue, StatusCode, header::USER_AGENT};
use log::{LevelFilter, debug, trace};
use once_cell::sync::OnceCell;
use url::Url;

const MAX_DETAIL_LENGTH: usize = 512;

type TransportFactory =
    dyn Fn() -> Result<Box<dyn BareHttpClient>, HttpClientError> + Send + Sync;

/// A web client sharing one lazily built HTTP client.
///
/// The HTTP client is built on first use from the settings at that time and
/// reused afterwards. Settings replaced later do not affect it.
pub struct WebClient {
    settings: Settings,
    transport: Box<TransportFactory>,
    client: OnceCell<HttpClient>,
}

impl WebClient {
    /// Creates a web client sending requests with [`reqwest`].
    pub fn new(settings: Settings) -> Self {
        Self::with_transport(settings, || Ok(Box::new(ReqwestHttpClient::new()?)))
    }

    /// Creates a web client with a custom bare HTTP client.
    ///
    /// The factory is called at most once per successful build.
    pub fn with_transport(
        settings: Settings,
        transport: impl Fn() -> Result<Box<dyn BareHttpClient>, HttpClientError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            settings,
            transport: Box::new(transport),
            client: OnceCell::new(),
        }
    }

    /// Returns settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces settings.
    ///
    /// An HTTP client already built keeps its configuration.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Returns the shared HTTP client, building it on first call.
    ///
    /// If building fails, the next call tries again.
    pub fn client(&self) -> Result<&HttpClient, Error> {
        Ok(self.client.get_or_try_init(|| self.build_client())?)
    }

    /// Fetches a body of a URL as text.
    ///
    /// `agent_info` is only logged. Requests carry the `User-Agent` header
    /// fixed when the shared client was built.
    pub async fn request(&self, url: &str, agent_info: Option<&[&str]>) -> Result<String, Error> {
        Self::successful_text(&self.fetch(url, agent_info).await?)
    }

    /// Sends a GET request and returns its response with any status.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        self.fetch(url, None).await
    }

    /// Sends a GET request on behalf of an agent.
    ///
    /// Unlike [`request`](Self::request), it returns a response with any
    /// status.
    pub async fn fetch(&self, url: &str, agent_info: Option<&[&str]>) -> Result<Response, Error> {
        trace!(
            "requesting {url} with the shared user agent instead of {:?}",
            user_agent(self.settings.version(), agent_info)
        );

        let url = Url::parse(url).map_err(HttpClientError::from)?;

        Ok(self.client()?.get(&url).await?)
    }

    /// Returns a body of a successful response as text.
    pub fn successful_text(response: &Response) -> Result<String, Error> {
        let text = response.text();

        if response.status() == StatusCode::OK {
            Ok(text.into_owned())
        } else {
            Err(Error::RequestFailed {
                status: response.status(),
                detail: text.chars().take(MAX_DETAIL_LENGTH).collect(),
            })
        }
    }

    /// Returns the last URL a request was redirected to.
    ///
    /// It falls back to the requested URL if no redirect was recorded.
    pub fn effective_url<'a>(url: &'a str, response: &'a Response) -> &'a str {
        response
            .redirect_history()
            .last()
            .map_or(url, String::as_str)
    }

    fn build_client(&self) -> Result<HttpClient, HttpClientError> {
        let settings = &self.settings;
        let mut middleware: Vec<Box<dyn Middleware>> = vec![];

        // The logger wraps the transcoder to log decoded bodies.
        if settings.logger_level() == LevelFilter::Debug {
            middleware.push(Box::new(Logger::new(
                settings.logger_target(),
                if settings.debug() {
                    LogFormat::Debug
                } else {
                    LogFormat::Short
                },
                ClockTimer::new(),
            )));
        }

        middleware.push(Box::new(Transcoder::new()));
        middleware.push(Box::new(RedirectFollower::new(
            settings.max_redirects(),
            settings.track_redirects(),
        )));

        debug!("building an HTTP client with {} middleware", middleware.len());

        Ok(HttpClient::new(
            (self.transport)()?,
            middleware,
            HeaderMap::from_iter([(
                USER_AGENT,
                HeaderValue::from_str(&user_agent(settings.version(), None))?,
            )]),
            settings.timeout(),
            ClockTimer::new(),
        ))
    }
}
