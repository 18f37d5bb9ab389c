//! HTTP transports and the request model shared by both clients.
//!
//! * `ReqwestAsync` / `UreqBlocking` make exactly one attempt per call and
//!   keep no idle connections between calls.
//! * `no_proxy` ignores system proxy environment variables (HTTP_PROXY, HTTPS_PROXY, etc.).

#[cfg(feature = "async")]
pub mod async_transport;
#[cfg(feature = "blocking")]
pub mod blocking_transport;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;
pub(crate) mod request;

use http::{HeaderMap, HeaderValue, Method, StatusCode};
use std::time::Duration;
use url::Url;

#[derive(Clone, Debug)]
pub struct TransportBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<HeaderValue>,
}

/// Fully resolved request handed to a transport.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<TransportBody>,
    /// Whole-call timeout, covering connect, send and body read.
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// Set when the status line arrived but reading the body failed.
    pub read_error: Option<Box<str>>,
}
