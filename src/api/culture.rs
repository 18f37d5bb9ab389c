use crate::Error;
use crate::transport::request::Request;
use crate::types::{Currencies, Locales, Markets, NearestCulture};
use http::Method;

fn markets_request(locale: &str) -> Result<Request, Error> {
    super::require_non_blank("locale", locale)?;
    Ok(Request::route(Method::GET, "culture/markets").segment(locale.trim()))
}

fn nearest_culture_request(ip: &str) -> Result<Request, Error> {
    super::require_non_blank("ip address", ip)?;
    Ok(Request::route(Method::GET, "culture/nearestculture").query_pair("ipAddress", ip.trim()))
}

/// Culture reference data: locales, currencies and markets.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct CultureService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl CultureService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }

    /// `GET /culture/locales`
    pub async fn list_locales(&self) -> Result<Locales, Error> {
        let req = Request::route(Method::GET, "culture/locales");
        self.client.send_json(req).await
    }

    /// `GET /culture/currencies`
    pub async fn list_currencies(&self) -> Result<Currencies, Error> {
        let req = Request::route(Method::GET, "culture/currencies");
        self.client.send_json(req).await
    }

    /// `GET /culture/markets/{locale}`; market names come back in `locale`.
    pub async fn list_markets(&self, locale: &str) -> Result<Markets, Error> {
        self.client.send_json(markets_request(locale)?).await
    }

    /// `GET /culture/nearestculture?ipAddress={ip}`
    pub async fn nearest_culture(&self, ip: &str) -> Result<NearestCulture, Error> {
        self.client.send_json(nearest_culture_request(ip)?).await
    }
}

/// Culture reference data (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingCultureService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingCultureService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }

    /// `GET /culture/locales`
    pub fn list_locales(&self) -> Result<Locales, Error> {
        let req = Request::route(Method::GET, "culture/locales");
        self.client.send_json(req)
    }

    /// `GET /culture/currencies`
    pub fn list_currencies(&self) -> Result<Currencies, Error> {
        let req = Request::route(Method::GET, "culture/currencies");
        self.client.send_json(req)
    }

    /// `GET /culture/markets/{locale}`
    pub fn list_markets(&self, locale: &str) -> Result<Markets, Error> {
        self.client.send_json(markets_request(locale)?)
    }

    /// `GET /culture/nearestculture?ipAddress={ip}`
    pub fn nearest_culture(&self, ip: &str) -> Result<NearestCulture, Error> {
        self.client.send_json(nearest_culture_request(ip)?)
    }
}
