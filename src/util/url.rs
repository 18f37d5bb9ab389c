use crate::Error;
use url::Url;

fn invalid_base(message: &'static str, source: Option<url::ParseError>) -> Error {
    Error::InvalidConfig {
        message: message.into(),
        source: source.map(|err| -> Box<dyn std::error::Error + Send + Sync> { Box::new(err) }),
    }
}

/// Parse a base URL and give it a trailing slash so joined routes keep its path.
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url =
        Url::parse(raw.trim()).map_err(|err| invalid_base("invalid base_url", Some(err)))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_base("base_url must be an absolute http(s) URL", None));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid_base(
            "base_url must not include query or fragment",
            None,
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Split a route like `/culture/markets/` into its non-empty segments.
pub(crate) fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Append `segments` to `base`, each percent-encoded as one path segment.
pub(crate) fn endpoint_url<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| invalid_base("base_url must be a hierarchical URL", None))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Copy of `url` without query, fragment or credentials, fit for error messages.
pub(crate) fn sanitize_url_for_error(url: &Url) -> Url {
    let mut safe = url.clone();
    safe.set_query(None);
    safe.set_fragment(None);
    // Only fails for URLs that cannot carry credentials in the first place.
    safe.set_username("").ok();
    safe.set_password(None).ok();
    safe
}
