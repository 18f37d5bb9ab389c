use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

/// Code carried by envelopes synthesized for failures that never produced a vendor response.
pub const INTERNAL_ERROR_CODE: i64 = 500;

#[derive(Debug, Clone, Copy)]
pub struct BodySnippetConfig {
    pub enabled: bool,
    pub max_bytes: usize,
}

impl Default for BodySnippetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: 4096,
        }
    }
}

/// `{code, message}` error body as returned by the vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<serde_json::Value>,
}

impl ErrorEnvelope {
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR_CODE, message)
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    Auth,
    NotFound,
    RateLimited,
    Api,
    Transport,
    Encode,
    Decode,
    InvalidRequest,
    InvalidConfig,
}

impl ErrorKind {
    /// Stable lowercase label, used for metrics and span fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::Api => "api",
            Self::Transport => "transport",
            Self::Encode => "encode",
            Self::Decode => "decode",
            Self::InvalidRequest => "invalid_request",
            Self::InvalidConfig => "invalid_config",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

/// Non-success response from the vendor.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub method: Method,
    /// Sanitized URL: no query/fragment/userinfo.
    pub url: Box<Url>,
    /// Parsed error body, or `{status, raw body}` when the body was not an envelope.
    pub envelope: ErrorEnvelope,
    /// Whether `envelope` was decoded from the response body.
    pub structured: bool,
    pub request_id: Option<Box<str>>,
    pub body_snippet: Option<Box<str>>,
}

impl HttpError {
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

/// All errors returned by the SDK.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{0}")]
    Auth(HttpError),

    #[error("{0}")]
    NotFound(HttpError),

    #[error("{0}")]
    RateLimited(HttpError),

    #[error("{0}")]
    Api(HttpError),

    #[error("Transport error during {method} {path}: {source}")]
    Transport {
        method: Method,
        path: Box<str>,
        kind: TransportErrorKind,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Request encoding error during {method} {path}: {source}")]
    Encode {
        method: Method,
        path: Box<str>,
        #[source]
        source: serde_json::Error,
    },

    #[error("Decode error (HTTP {status}) during {method} {path}: {source}")]
    Decode {
        status: StatusCode,
        method: Method,
        path: Box<str>,
        request_id: Option<Box<str>>,
        body_snippet: Option<Box<str>>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: Box<str> },

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: Box<str>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth(_) => ErrorKind::Auth,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::Api(_) => ErrorKind::Api,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Encode { .. } => ErrorKind::Encode,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    /// The vendor's non-success response, if this error came from one.
    #[must_use]
    pub fn http(&self) -> Option<&HttpError> {
        match self {
            Self::Auth(e) | Self::NotFound(e) | Self::RateLimited(e) | Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// `true` when the vendor answered with a non-success status.
    ///
    /// Everything else failed locally before a vendor response existed.
    #[must_use]
    pub fn is_vendor(&self) -> bool {
        self.http().is_some()
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Decode { status, .. } => Some(*status),
            other => other.http().map(|e| e.status),
        }
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Decode { request_id, .. } => request_id.as_deref(),
            other => other.http().and_then(|e| e.request_id.as_deref()),
        }
    }

    /// Envelope code: the vendor's for vendor errors, [`INTERNAL_ERROR_CODE`] otherwise.
    #[must_use]
    pub fn code(&self) -> i64 {
        self.http().map_or(INTERNAL_ERROR_CODE, |e| e.envelope.code)
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self.http() {
            Some(e) => e.envelope.message.clone(),
            None => self.to_string(),
        }
    }

    /// Uniform `{code, message}` view over every variant.
    #[must_use]
    pub fn envelope(&self) -> ErrorEnvelope {
        match self.http() {
            Some(e) => e.envelope.clone(),
            None => ErrorEnvelope::internal(self.to_string()),
        }
    }

    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Hint for callers implementing their own retry policy. The SDK never retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Api(e) => matches!(
                e.status,
                StatusCode::BAD_GATEWAY
                    | StatusCode::SERVICE_UNAVAILABLE
                    | StatusCode::GATEWAY_TIMEOUT
            ),
            Self::Transport { kind, .. } => matches!(
                kind,
                TransportErrorKind::Timeout | TransportErrorKind::Connect
            ),
            _ => false,
        }
    }

    pub(crate) fn from_http(error: HttpError) -> Self {
        match error.status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(error),
            StatusCode::NOT_FOUND => Self::NotFound(error),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited(error),
            _ => Self::Api(error),
        }
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into().into_boxed_str(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP {} ({} {}): {}",
            self.status,
            self.method,
            self.path(),
            self.envelope
        )?;
        if let Some(request_id) = self.request_id.as_deref() {
            write!(f, " [request-id: {request_id}]")?;
        }
        Ok(())
    }
}
