#![doc = include_str!("../README.md")]

extern crate alloc;

mod config;
mod error;
mod http_client;
mod middleware;
mod request;
mod response;
mod timer;
mod user_agent;
mod web_client;

pub use self::{
    config::*,
    error::Error,
    http_client::{BareHttpClient, BareResponse, HttpClient, HttpClientError, ReqwestHttpClient},
    middleware::{LogFormat, Logger, Middleware, Next, RedirectFollower, Transcoder},
    request::Request,
    response::Response,
    timer::{ClockTimer, Timer},
    user_agent::{PRODUCT_NAME, PROJECT_URL, user_agent},
    web_client::WebClient,
};
