//! Flight autosuggest: ranked places matching a search term.

use super::PlaceType;
use crate::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSuggestQuery {
    pub market: String,
    pub locale: String,
    pub search_term: String,
    /// Restrict suggestions to these place types; empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_entity_types: Vec<PlaceType>,
}

/// Body of `POST /autosuggest/flights`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSuggestRequest {
    pub query: AutoSuggestQuery,
    /// Maximum number of places returned; the vendor default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Rank places as destinations instead of origins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_destination: Option<bool>,
}

impl AutoSuggestRequest {
    #[must_use]
    pub fn new(
        market: impl Into<String>,
        locale: impl Into<String>,
        search_term: impl Into<String>,
    ) -> Self {
        Self {
            query: AutoSuggestQuery {
                market: market.into(),
                locale: locale.into(),
                search_term: search_term.into(),
                included_entity_types: Vec::new(),
            },
            limit: None,
            is_destination: None,
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn destination(mut self, yes: bool) -> Self {
        self.is_destination = Some(yes);
        self
    }

    #[must_use]
    pub fn entity_types(mut self, types: impl IntoIterator<Item = PlaceType>) -> Self {
        self.query.included_entity_types = types.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("market", &self.query.market),
            ("locale", &self.query.locale),
            ("searchTerm", &self.query.search_term),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_request(format!(
                    "autosuggest {field} must not be empty"
                )));
            }
        }
        if self.limit == Some(0) {
            return Err(Error::invalid_request("autosuggest limit must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SuggestedPlace {
    pub entity_id: String,
    pub iata_code: String,
    pub parent_id: String,
    pub name: String,
    pub country_id: String,
    pub country_name: String,
    pub city_name: String,
    /// `"lat, lon"` as sent by the vendor.
    pub location: String,
    pub hierarchy: String,
    #[serde(rename = "type")]
    pub place_type: PlaceType,
    /// `[start, end)` character ranges of `name` matching the search term.
    pub highlighting: Vec<Vec<u32>>,
}

/// Response of `POST /autosuggest/flights`, best match first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct AutoSuggestResponse {
    pub places: Vec<SuggestedPlace>,
}
