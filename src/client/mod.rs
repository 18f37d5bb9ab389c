//! Client implementations (async + optional blocking).
//!
//! Both flavours share `CallConfig`, which turns a `Request` into a
//! [`TransportRequest`] and a [`TransportResponse`] into a result, so only the
//! wire call itself differs between them.

#[cfg(feature = "async")]
pub mod async_client;
#[cfg(feature = "blocking")]
pub mod blocking_client;

#[cfg(feature = "async")]
pub use async_client::{Client, ClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{BlockingClient, BlockingClientBuilder};

use crate::{
    ApiKey, BodySnippetConfig, Error, HttpError, RequestHook, request_hook,
    transport::{
        TransportBody, TransportRequest, TransportResponse,
        request::{Request, Response},
    },
    util::{
        diagnostics,
        url::{endpoint_url, sanitize_url_for_error},
    },
};
use http::{HeaderMap, HeaderValue, StatusCode, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Production endpoint of the partner API.
pub const DEFAULT_BASE_URL: &str = "https://partners.api.skyscanner.net/apiservices/v3";

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Immutable per-client settings applied to every call.
pub(crate) struct CallConfig {
    pub(crate) base: Url,
    pub(crate) api_key: ApiKey,
    pub(crate) timeout: Duration,
    pub(crate) default_headers: HeaderMap,
    pub(crate) body_snippet: BodySnippetConfig,
    pub(crate) request_hook: Option<RequestHook>,
}

impl CallConfig {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        self.api_key.header_value()?;
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig {
                message: "timeout must be greater than zero".into(),
                source: None,
            });
        }
        Ok(())
    }

    /// Resolve the URL, stack the headers and run the request hook.
    ///
    /// Header precedence, lowest first: builder defaults, `Content-Type` and
    /// `Connection`, `x-api-key`, then the hook.
    pub(crate) fn transport_request(&self, req: &Request) -> Result<TransportRequest, Error> {
        let url = endpoint_url(&self.base, req.segments.iter().map(String::as_str))?;

        let mut headers = self.default_headers.clone();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
        self.api_key.apply(&mut headers)?;

        let mut out = TransportRequest {
            method: req.method.clone(),
            url,
            headers,
            query: req.query.clone(),
            body: req.body.clone().map(|body| TransportBody {
                bytes: body.bytes,
                content_type: body.content_type,
            }),
            timeout: self.timeout,
        };
        request_hook::run(self.request_hook.as_ref(), &mut out)?;
        Ok(out)
    }

    /// Pass `200 OK` through; every other status becomes a vendor error.
    pub(crate) fn check_status(
        &self,
        req: &Request,
        url: &Url,
        resp: TransportResponse,
    ) -> Result<Response, Error> {
        if resp.status == StatusCode::OK {
            return Ok(Response {
                status: resp.status,
                headers: resp.headers,
                body: resp.body,
            });
        }

        let (envelope, structured) = diagnostics::error_envelope(
            resp.status,
            &resp.body,
            resp.read_error.as_deref(),
            &self.api_key,
        );
        Err(Error::from_http(HttpError {
            status: resp.status,
            method: req.method.clone(),
            url: Box::new(sanitize_url_for_error(url)),
            envelope,
            structured,
            request_id: diagnostics::request_id(&resp.headers),
            body_snippet: diagnostics::body_snippet(&resp.body, self.body_snippet, &self.api_key),
        }))
    }

    pub(crate) fn decode<T: DeserializeOwned>(
        &self,
        req: &Request,
        resp: &Response,
    ) -> Result<T, Error> {
        resp.json().map_err(|source| Error::Decode {
            status: resp.status,
            method: req.method.clone(),
            path: req.display_path().into_boxed_str(),
            request_id: diagnostics::request_id(&resp.headers),
            body_snippet: diagnostics::body_snippet(&resp.body, self.body_snippet, &self.api_key),
            source: Box::new(source),
        })
    }
}

impl std::fmt::Debug for CallConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallConfig")
            .field("base_url", &self.base.as_str())
            .field("api_key", &self.api_key)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
