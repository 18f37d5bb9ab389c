use crate::Error;
use crate::transport::TransportRequest;
use http::{HeaderMap, HeaderValue, Method};
use std::sync::Arc;
use url::Url;

/// What a [`RequestHook`] sees of an outgoing call.
///
/// Headers already include `x-api-key`, `Content-Type` and any builder defaults,
/// so a hook can add tracing headers or override them. Returning an error aborts
/// the call before anything is sent.
pub struct RequestHookContext<'a> {
    pub method: &'a Method,
    /// Endpoint URL without the query string.
    pub url: &'a Url,
    pub headers: &'a mut HeaderMap,
    pub query: &'a [(String, String)],
    /// Serialized JSON body, when the operation has one.
    pub body: Option<&'a [u8]>,
    pub content_type: Option<&'a HeaderValue>,
}

pub type RequestHook =
    Arc<dyn for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static>;

/// Give `hook` its view of `req`; header edits land in `req`.
pub(crate) fn run(hook: Option<&RequestHook>, req: &mut TransportRequest) -> Result<(), Error> {
    let Some(hook) = hook else {
        return Ok(());
    };
    let TransportRequest {
        method,
        url,
        headers,
        query,
        body,
        ..
    } = req;
    let body = body.as_ref();
    hook(RequestHookContext {
        method: &*method,
        url: &*url,
        headers,
        query: query.as_slice(),
        body: body.map(|b| b.bytes.as_slice()),
        content_type: body.and_then(|b| b.content_type.as_ref()),
    })
}
