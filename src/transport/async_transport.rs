use super::{TransportRequest, TransportResponse};
use crate::error::{Error, TransportErrorKind};
use async_trait::async_trait;
use http::{Method, StatusCode, header::CONTENT_TYPE};
use reqwest::Client;
use std::sync::Arc;
use url::Url;

#[cfg(feature = "rustls")]
fn install_crypto_provider() {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        // Another provider may already be installed by the application.
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

#[cfg(not(feature = "rustls"))]
fn install_crypto_provider() {}

/// Trait implemented by any async HTTP layer.
#[async_trait]
pub trait AsyncTransport: Send + Sync + 'static {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error>;
}

pub type DynAsyncTransport = Arc<dyn AsyncTransport>;

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for Arc<T> {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        (**self).send(req).await
    }
}

fn transport_error(method: &Method, url: &Url, err: reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };
    Error::Transport {
        method: method.clone(),
        path: url.path().into(),
        kind,
        source: Box::new(err),
    }
}

/// Default async transport built on `reqwest`.
#[derive(Clone)]
pub struct ReqwestAsync {
    client: Client,
}

impl ReqwestAsync {
    /// Construct a new transport.
    ///
    /// * `ua` – User-Agent header.
    /// * `no_proxy` – ignore `HTTP_PROXY` / `HTTPS_PROXY` and friends.
    ///
    /// Idle connections are never kept; the timeout comes with each
    /// [`TransportRequest`].
    pub fn try_new(ua: &str, no_proxy: bool) -> Result<Self, Error> {
        install_crypto_provider();

        let mut builder = Client::builder().user_agent(ua).pool_max_idle_per_host(0);
        if no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(|err| Error::InvalidConfig {
            message: "failed to build async HTTP client".into(),
            source: Some(Box::new(err)),
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AsyncTransport for ReqwestAsync {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        let TransportRequest {
            method,
            url,
            mut headers,
            query,
            body,
            timeout,
        } = req;

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .query(&query)
            .timeout(timeout);
        if let Some(body) = body {
            if let Some(content_type) = body.content_type {
                headers.entry(CONTENT_TYPE).or_insert(content_type);
            }
            builder = builder.body(body.bytes);
        }

        let response = builder
            .headers(headers)
            .send()
            .await
            .map_err(|err| transport_error(&method, &url, err))?;

        let status = response.status();
        let headers = response.headers().clone();
        match response.bytes().await {
            Ok(body) => Ok(TransportResponse {
                status,
                headers,
                body: body.to_vec(),
                read_error: None,
            }),
            Err(err) if status != StatusCode::OK => Ok(TransportResponse {
                status,
                headers,
                body: Vec::new(),
                read_error: Some(err.to_string().into()),
            }),
            Err(err) => Err(transport_error(&method, &url, err)),
        }
    }
}
