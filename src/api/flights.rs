use crate::Error;
use crate::transport::request::Request;
use crate::types::search::CreateSearchBody;
use crate::types::{SearchQuery, SearchResult, SessionToken};
use http::Method;

const CREATE_ROUTE: &str = "flights/live/search/create";
const POLL_ROUTE: &str = "flights/live/search/poll";

fn create_request(query: &SearchQuery) -> Result<Request, Error> {
    query.validate()?;
    Request::route(Method::POST, CREATE_ROUTE).json(&CreateSearchBody { query })
}

fn poll_request(token: &SessionToken) -> Result<Request, Error> {
    super::require_non_blank("session token", token.as_str())?;
    Ok(Request::route(Method::POST, POLL_ROUTE).segment(token.as_str()))
}

/// Live flight search.
///
/// A search starts with [`FlightsService::create_search`] and is refreshed with
/// [`FlightsService::poll_search`] until [`SearchResult::is_complete`].
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct FlightsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl FlightsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }

    /// `POST /flights/live/search/create`
    pub async fn create_search(&self, query: &SearchQuery) -> Result<SearchResult, Error> {
        let req = create_request(query)?;
        self.client.send_json(req).await
    }

    /// `POST /flights/live/search/poll/{sessionToken}`
    pub async fn poll_search(&self, token: impl Into<SessionToken>) -> Result<SearchResult, Error> {
        let req = poll_request(&token.into())?;
        self.client.send_json(req).await
    }
}

/// Live flight search (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingFlightsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingFlightsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }

    /// `POST /flights/live/search/create`
    pub fn create_search(&self, query: &SearchQuery) -> Result<SearchResult, Error> {
        self.client.send_json(create_request(query)?)
    }

    /// `POST /flights/live/search/poll/{sessionToken}`
    pub fn poll_search(&self, token: impl Into<SessionToken>) -> Result<SearchResult, Error> {
        self.client.send_json(poll_request(&token.into())?)
    }
}
