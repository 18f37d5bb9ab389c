use crate::Error;
use crate::util::url::path_segments;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

#[derive(Clone, Debug)]
pub(crate) struct RequestBody {
    pub(crate) bytes: Vec<u8>,
    pub(crate) content_type: Option<HeaderValue>,
}

impl RequestBody {
    pub(crate) fn json_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: Some(HeaderValue::from_static("application/json")),
        }
    }
}

/// One endpoint call before it is bound to a client's base URL and headers.
#[derive(Clone, Debug)]
pub(crate) struct Request {
    pub(crate) method: Method,
    pub(crate) segments: Vec<String>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<RequestBody>,
}

impl Request {
    /// Request for a `/`-separated route relative to the base URL.
    #[must_use]
    pub(crate) fn route(method: Method, route: &str) -> Self {
        Self {
            method,
            segments: path_segments(route).map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append one more path segment; it is percent-encoded as a single segment.
    #[must_use]
    pub(crate) fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    #[must_use]
    pub(crate) fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Serialize `payload` as the JSON body.
    ///
    /// Fails with [`Error::Encode`] before anything is sent.
    pub(crate) fn json<B: Serialize + ?Sized>(mut self, payload: &B) -> Result<Self, Error> {
        match serde_json::to_vec(payload) {
            Ok(bytes) => {
                self.body = Some(RequestBody::json_bytes(bytes));
                Ok(self)
            }
            Err(source) => Err(Error::Encode {
                path: self.display_path().into_boxed_str(),
                method: self.method,
                source,
            }),
        }
    }

    pub(crate) fn display_path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Response {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Vec<u8>,
}

impl Response {
    pub(crate) fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
