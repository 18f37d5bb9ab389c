//! Blocking flight search client.

use crate::{
    ApiKey, BodySnippetConfig, Error, RequestHookContext, api,
    client::{CallConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT},
    transport::{
        blocking_transport::{DynBlockingTransport, UreqBlocking},
        request::{Request, Response},
    },
    util::url::normalize_base_url,
};
use http::HeaderMap;
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use url::Url;

#[cfg(feature = "tracing")]
use crate::util::diagnostics;
#[cfg(feature = "tracing")]
use tracing::field;

/// Configures and constructs [`BlockingClient`].
pub struct BlockingClientBuilder {
    base_url: String,
    api_key: ApiKey,
    user_agent: String,
    timeout: Duration,
    no_proxy: bool,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    request_hook: Option<crate::RequestHook>,
    transport: Option<DynBlockingTransport>,
}

impl BlockingClientBuilder {
    fn new(api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            no_proxy: false,
            default_headers: HeaderMap::new(),
            body_snippet: BodySnippetConfig::default(),
            request_hook: None,
            transport: None,
        }
    }

    /// Point the client at another deployment (a sandbox or a mock server).
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into();
        self
    }

    /// Connect directly even when `HTTP(S)_PROXY` is set.
    pub fn no_system_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Bound on a whole call: connect, send and reading the body.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    /// Header sent on every call unless the request hook replaces it.
    ///
    /// Defaults never replace `x-api-key`, `Content-Type` or `Connection`.
    pub fn default_header(
        mut self,
        name: http::header::HeaderName,
        value: http::HeaderValue,
    ) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    /// Keep a redacted prefix of the response body on HTTP and decode errors.
    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.body_snippet.enabled = enabled;
        self
    }

    /// Upper bound, in bytes, on the captured body prefix.
    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.body_snippet.max_bytes = max_bytes;
        self
    }

    /// Add a hook invoked right before each request is sent.
    pub fn request_hook<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.request_hook = Some(Arc::new(hook));
        self
    }

    /// Replace the `ureq` transport, e.g. with an in-process fake.
    ///
    /// `user_agent` and `no_system_proxy` only configure the default transport.
    pub fn transport(mut self, transport: DynBlockingTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the settings and create the client.
    pub fn build(self) -> Result<BlockingClient, Error> {
        let config = CallConfig {
            base: normalize_base_url(&self.base_url)?,
            api_key: self.api_key,
            timeout: self.timeout,
            default_headers: self.default_headers,
            body_snippet: self.body_snippet,
            request_hook: self.request_hook,
        };
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UreqBlocking::try_new(&self.user_agent, self.no_proxy)?),
        };

        Ok(BlockingClient {
            inner: Arc::new(Inner { config, transport }),
        })
    }
}

/// Blocking client. Each call runs on the calling thread.
#[derive(Clone)]
pub struct BlockingClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: CallConfig,
    transport: DynBlockingTransport,
}

impl BlockingClient {
    pub fn builder(api_key: impl Into<ApiKey>) -> BlockingClientBuilder {
        BlockingClientBuilder::new(api_key.into())
    }

    /// Client against the production endpoint with default settings.
    pub fn new(api_key: impl Into<ApiKey>) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.config.base
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.config.timeout
    }

    #[must_use]
    pub fn flights(&self) -> api::BlockingFlightsService {
        api::BlockingFlightsService::new(self.clone())
    }

    #[must_use]
    pub fn culture(&self) -> api::BlockingCultureService {
        api::BlockingCultureService::new(self.clone())
    }

    #[must_use]
    pub fn autosuggest(&self) -> api::BlockingAutosuggestService {
        api::BlockingAutosuggestService::new(self.clone())
    }

    pub(crate) fn send_json<T: DeserializeOwned>(&self, req: Request) -> Result<T, Error> {
        let resp = self.execute_request(&req)?;
        self.inner.config.decode(&req, &resp)
    }

    pub(crate) fn execute_request(&self, req: &Request) -> Result<Response, Error> {
        let config = &self.inner.config;

        #[cfg(feature = "metrics")]
        let meter = crate::transport::metrics::RequestMetrics::start(&req.method);
        #[cfg(feature = "tracing")]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "skyscanner.request",
            http.method = %req.method,
            http.host = %config.base.host_str().unwrap_or_default(),
            http.path = %req.display_path(),
            http.status = field::Empty,
            request_id = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let outcome = match config.transport_request(req) {
            Ok(wire) => {
                let url = wire.url.clone();
                match self.inner.transport.send(wire) {
                    Ok(resp) => {
                        #[cfg(feature = "tracing")]
                        {
                            span.record("http.status", resp.status.as_u16() as i64);
                            if let Some(rid) = diagnostics::request_id(&resp.headers) {
                                span.record("request_id", field::display(rid));
                            }
                        }
                        #[cfg(feature = "metrics")]
                        let status = resp.status;
                        let checked = config.check_status(req, &url, resp);
                        #[cfg(feature = "metrics")]
                        meter.finish(Some(status), checked.as_ref().err().map(Error::kind));
                        checked
                    }
                    Err(err) => {
                        #[cfg(feature = "metrics")]
                        meter.finish(None, Some(err.kind()));
                        Err(err)
                    }
                }
            }
            Err(err) => {
                #[cfg(feature = "metrics")]
                meter.finish(None, Some(err.kind()));
                Err(err)
            }
        };

        #[cfg(feature = "tracing")]
        {
            span.record("latency_ms", start.elapsed().as_millis() as i64);
            if let Err(err) = &outcome {
                span.record("error_kind", err.kind().as_str());
                tracing::debug!(error = %err, "skyscanner request failed");
            }
        }

        outcome
    }
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
