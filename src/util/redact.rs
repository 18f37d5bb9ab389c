use crate::ApiKey;

/// Placeholder written wherever the API key would appear.
pub(crate) const REDACTED: &str = "<redacted>";

/// Longest prefix of `s` within `max_bytes` that ends on a char boundary.
pub(crate) fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    let end = (0..=max_bytes.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    &s[..end]
}

/// Replace every occurrence of the API key in `text`.
pub(crate) fn redact_text(text: String, api_key: &ApiKey) -> String {
    let secret = api_key.expose().trim();
    if secret.is_empty() || !text.contains(secret) {
        return text;
    }
    text.replace(secret, REDACTED)
}
