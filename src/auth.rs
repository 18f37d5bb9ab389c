use crate::Error;
use crate::util::redact::REDACTED;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;

/// Header carrying the partner API key on every request.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

#[derive(Clone, Default, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Static partner API key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApiKey(SecretString);

impl ApiKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::new(value))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose()
    }

    /// Reject keys that could never be sent as a header.
    pub(crate) fn header_value(&self) -> Result<HeaderValue, Error> {
        let raw = self.0.expose().trim();
        if raw.is_empty() {
            return Err(Error::InvalidConfig {
                message: "api key must not be empty".into(),
                source: None,
            });
        }
        let mut value = HeaderValue::from_str(raw).map_err(|err| Error::InvalidConfig {
            message: "invalid x-api-key header value".into(),
            source: Some(Box::new(err)),
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<(), Error> {
        headers.insert(API_KEY_HEADER, self.header_value()?);
        Ok(())
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
