use super::{TransportRequest, TransportResponse};
use crate::error::{Error, TransportErrorKind};
use http::{HeaderMap, StatusCode, header::CONTENT_TYPE};
use std::{sync::Arc, time::Duration};
use ureq::{Agent, RequestBuilder};

/// Trait implemented by any blocking HTTP layer.
pub trait BlockingTransport: Send + Sync + 'static {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error>;
}

pub type DynBlockingTransport = Arc<dyn BlockingTransport>;

impl<T: BlockingTransport + ?Sized> BlockingTransport for Arc<T> {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        (**self).send(req)
    }
}

fn classify(err: &ureq::Error) -> TransportErrorKind {
    use std::io::ErrorKind as Io;
    match err {
        ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => TransportErrorKind::Connect,
        ureq::Error::Io(io) => match io.kind() {
            Io::TimedOut => TransportErrorKind::Timeout,
            Io::ConnectionRefused | Io::ConnectionReset | Io::ConnectionAborted => {
                TransportErrorKind::Connect
            }
            _ => TransportErrorKind::Other,
        },
        _ => TransportErrorKind::Other,
    }
}

fn prepare<B>(
    mut builder: RequestBuilder<B>,
    headers: &HeaderMap,
    query: &[(String, String)],
    timeout: Duration,
) -> RequestBuilder<B> {
    builder = builder.query_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    builder.config().timeout_global(Some(timeout)).build()
}

/// Default blocking transport built on `ureq`.
#[derive(Clone)]
pub struct UreqBlocking {
    agent: Agent,
}

impl UreqBlocking {
    /// See [`crate::transport::async_transport::ReqwestAsync::try_new`].
    pub fn try_new(ua: &str, no_proxy: bool) -> Result<Self, Error> {
        let mut config = Agent::config_builder()
            .http_status_as_error(false)
            .max_idle_connections(0)
            .max_idle_connections_per_host(0)
            .user_agent(ua);
        if no_proxy {
            config = config.proxy(None);
        }
        Ok(Self {
            agent: Agent::new_with_config(config.build()),
        })
    }
}

impl BlockingTransport for UreqBlocking {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        let TransportRequest {
            method,
            url,
            mut headers,
            query,
            body,
            timeout,
        } = req;
        if let Some(content_type) = body.as_ref().and_then(|b| b.content_type.clone()) {
            headers.entry(CONTENT_TYPE).or_insert(content_type);
        }

        let failed = |err: ureq::Error| Error::Transport {
            method: method.clone(),
            path: url.path().into(),
            kind: classify(&err),
            source: Box::new(err),
        };

        let sent = match method.as_str() {
            "GET" => prepare(self.agent.get(url.as_str()), &headers, &query, timeout).call(),
            "POST" => {
                let builder = prepare(self.agent.post(url.as_str()), &headers, &query, timeout);
                match body {
                    Some(body) => builder.send(body.bytes),
                    None => builder.send_empty(),
                }
            }
            other => {
                return Err(Error::InvalidConfig {
                    message: format!("blocking transport does not issue {other} requests")
                        .into(),
                    source: None,
                });
            }
        };
        let mut response = sent.map_err(failed)?;

        let status = response.status();
        let headers = response.headers().clone();
        match response.body_mut().with_config().limit(u64::MAX).read_to_vec() {
            Ok(body) => Ok(TransportResponse {
                status,
                headers,
                body,
                read_error: None,
            }),
            Err(err) if status != StatusCode::OK => Ok(TransportResponse {
                status,
                headers,
                body: Vec::new(),
                read_error: Some(err.to_string().into()),
            }),
            Err(err) => Err(failed(err)),
        }
    }
}
