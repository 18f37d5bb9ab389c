use crate::{ApiKey, BodySnippetConfig, ErrorEnvelope};
use http::{HeaderMap, StatusCode};
use serde::Deserialize;

use super::redact::{redact_text, truncate_utf8};

pub(crate) fn request_id(headers: &HeaderMap) -> Option<Box<str>> {
    for name in [
        "x-request-id",
        "x-correlation-id",
        "x-skyscanner-traceid",
        "x-amzn-requestid",
        "x-amz-request-id",
    ] {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string().into_boxed_str());
            }
        }
    }
    None
}

#[derive(Deserialize)]
struct RawEnvelope {
    code: Option<i64>,
    message: Option<String>,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

/// Decode a vendor `{code, message}` body. Objects carrying neither field do not count.
pub(crate) fn parse_envelope(body: &[u8]) -> Option<ErrorEnvelope> {
    let raw: RawEnvelope = serde_json::from_slice(body).ok()?;
    if raw.code.is_none() && raw.message.is_none() {
        return None;
    }
    Some(ErrorEnvelope {
        code: raw.code.unwrap_or_default(),
        message: raw.message.unwrap_or_default(),
        details: raw.details,
    })
}

/// Envelope for a non-success response, plus whether it was parsed from the body.
///
/// Unparseable bodies keep the HTTP status as code and the raw text (or the
/// body read failure) as message.
pub(crate) fn error_envelope(
    status: StatusCode,
    body: &[u8],
    read_error: Option<&str>,
    api_key: &ApiKey,
) -> (ErrorEnvelope, bool) {
    let code = i64::from(status.as_u16());
    if let Some(read_error) = read_error {
        let message = format!("response reading error: {read_error}");
        return (
            ErrorEnvelope::new(code, redact_text(message, api_key)),
            false,
        );
    }

    match parse_envelope(body) {
        Some(mut envelope) => {
            envelope.message = redact_text(envelope.message, api_key);
            (envelope, true)
        }
        None => {
            let raw = String::from_utf8_lossy(body).into_owned();
            (ErrorEnvelope::new(code, redact_text(raw, api_key)), false)
        }
    }
}

pub(crate) fn body_snippet(
    body: &[u8],
    config: BodySnippetConfig,
    api_key: &ApiKey,
) -> Option<Box<str>> {
    if !config.enabled {
        return None;
    }

    let body = String::from_utf8_lossy(body);
    let snippet = truncate_utf8(&body, config.max_bytes).to_string();
    Some(redact_text(snippet, api_key).into_boxed_str())
}
