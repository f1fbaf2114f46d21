use reqwest::{Method, blocking::Client};
use std::{fmt, time::Duration};
use thiserror::Error;

/// Query parameter holding the provider credential; masked whenever a request is printed.
pub const API_KEY_PARAM: &str = "apikey";

/// A single outgoing call, built per request and dropped afterwards.
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub resource: String,
    pub params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn get(resource: impl Into<String>, params: Vec<(&'static str, String)>) -> Self {
        Self { method: Method::GET, resource: resource.into(), params }
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} params={{", self.method, self.resource)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if *name == API_KEY_PARAM {
                write!(f, "{name}=<redacted>")?;
            } else {
                write!(f, "{name}={value}")?;
            }
        }
        f.write_str("}")
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiRequest({self})")
    }
}

/// Status and undecoded body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Failure before a complete response was received.
///
/// Messages never include the request URL, since it carries the API key in its query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Other(String),
}

pub trait Transport: Send + Sync + fmt::Debug {
    /// Perform `request`, giving up after `timeout`.
    fn send(&self, request: &ApiRequest, timeout: Duration) -> Result<RawResponse, TransportError>;
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::from_client(Client::new())
    }

    /// Use a preconfigured client, e.g. with custom proxy or TLS settings.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &ApiRequest, timeout: Duration) -> Result<RawResponse, TransportError> {
        let res = self
            .http
            .request(request.method.clone(), &request.resource)
            .query(&request.params)
            .timeout(timeout)
            .send()
            .map_err(classify)?;

        let status = res.status().as_u16();
        let body = res.text().map_err(|e| match classify(e) {
            TransportError::Other(msg) => TransportError::Body(msg),
            other => other,
        })?;

        Ok(RawResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout;
    }

    let connect = err.is_connect();
    let err = err.without_url();

    let mut msg = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        msg.push_str(&format!(": {cause}"));
        source = cause.source();
    }

    if connect { TransportError::Connect(msg) } else { TransportError::Other(msg) }
}
