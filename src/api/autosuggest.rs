use crate::Error;
use crate::transport::request::Request;
use crate::types::{AutoSuggestRequest, AutoSuggestResponse};
use http::Method;

fn suggest_request(request: &AutoSuggestRequest) -> Result<Request, Error> {
    request.validate()?;
    Request::route(Method::POST, "autosuggest/flights").json(request)
}

/// Place autosuggest for flight search boxes.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct AutosuggestService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl AutosuggestService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }

    /// `POST /autosuggest/flights`
    pub async fn auto_suggest_flights(
        &self,
        request: &AutoSuggestRequest,
    ) -> Result<AutoSuggestResponse, Error> {
        self.client.send_json(suggest_request(request)?).await
    }
}

#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingAutosuggestService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingAutosuggestService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }

    /// `POST /autosuggest/flights`
    pub fn auto_suggest_flights(
        &self,
        request: &AutoSuggestRequest,
    ) -> Result<AutoSuggestResponse, Error> {
        self.client.send_json(suggest_request(request)?)
    }
}
