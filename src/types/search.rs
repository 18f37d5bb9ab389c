//! Live flight search: create/poll request bodies and the shared result shape.

use super::{Content, LocalDate, SessionToken};
use crate::Error;
use serde::{Deserialize, Serialize};

wire_enum! {
    pub struct CabinClass {
        UNSPECIFIED = "CABIN_CLASS_UNSPECIFIED",
        ECONOMY = "CABIN_CLASS_ECONOMY",
        PREMIUM_ECONOMY = "CABIN_CLASS_PREMIUM_ECONOMY",
        BUSINESS = "CABIN_CLASS_BUSINESS",
        FIRST = "CABIN_CLASS_FIRST",
    }
    default = UNSPECIFIED;
}

wire_enum! {
    /// Progress of a search (also echoed by culture lookups).
    pub struct ResultStatus {
        UNSPECIFIED = "RESULT_STATUS_UNSPECIFIED",
        COMPLETE = "RESULT_STATUS_COMPLETE",
        INCOMPLETE = "RESULT_STATUS_INCOMPLETE",
        FAILED = "RESULT_STATUS_FAILED",
    }
    default = UNSPECIFIED;
}

wire_enum! {
    /// How a poll response relates to the content returned before it.
    pub struct ResultAction {
        UNSPECIFIED = "RESULT_ACTION_UNSPECIFIED",
        /// Content replaces everything returned previously.
        REPLACED = "RESULT_ACTION_REPLACED",
        NOT_MODIFIED = "RESULT_ACTION_NOT_MODIFIED",
        OMITTED = "RESULT_ACTION_OMITTED",
    }
    default = UNSPECIFIED;
}

/// Place reference in a query leg: either an IATA code or a vendor entity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceId {
    Iata(String),
    EntityId(String),
}

impl PlaceId {
    #[must_use]
    pub fn iata(code: impl Into<String>) -> Self {
        Self::Iata(code.into())
    }

    #[must_use]
    pub fn entity(id: impl Into<String>) -> Self {
        Self::EntityId(id.into())
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Iata(value) | Self::EntityId(value) => value.trim().is_empty(),
        }
    }
}

/// One origin-to-destination leg to search for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLeg {
    pub origin_place_id: PlaceId,
    /// Omit to search "everywhere".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_place_id: Option<PlaceId>,
    pub date: LocalDate,
}

impl QueryLeg {
    #[must_use]
    pub fn new(origin: PlaceId, destination: PlaceId, date: LocalDate) -> Self {
        Self {
            origin_place_id: origin,
            destination_place_id: Some(destination),
            date,
        }
    }

    #[must_use]
    pub fn anywhere(origin: PlaceId, date: LocalDate) -> Self {
        Self {
            origin_place_id: origin,
            destination_place_id: None,
            date,
        }
    }
}

/// Query of a live search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub market: String,
    pub locale: String,
    pub currency: String,
    #[serde(rename = "query_legs")]
    pub query_legs: Vec<QueryLeg>,
    pub adults: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children_ages: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabin_class: Option<CabinClass>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_carriers_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_carriers_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_agents_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_agents_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_sustainability_data: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nearby_airports: bool,
}

impl SearchQuery {
    /// A one-adult query with no legs yet.
    #[must_use]
    pub fn new(
        market: impl Into<String>,
        locale: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            market: market.into(),
            locale: locale.into(),
            currency: currency.into(),
            query_legs: Vec::new(),
            adults: 1,
            children_ages: Vec::new(),
            cabin_class: None,
            included_carriers_ids: Vec::new(),
            excluded_carriers_ids: Vec::new(),
            included_agents_ids: Vec::new(),
            excluded_agents_ids: Vec::new(),
            include_sustainability_data: false,
            nearby_airports: false,
        }
    }

    #[must_use]
    pub fn leg(mut self, leg: QueryLeg) -> Self {
        self.query_legs.push(leg);
        self
    }

    #[must_use]
    pub fn adults(mut self, adults: i32) -> Self {
        self.adults = adults;
        self
    }

    #[must_use]
    pub fn children_ages(mut self, ages: impl IntoIterator<Item = i32>) -> Self {
        self.children_ages = ages.into_iter().collect();
        self
    }

    #[must_use]
    pub fn cabin_class(mut self, cabin_class: CabinClass) -> Self {
        self.cabin_class = Some(cabin_class);
        self
    }

    #[must_use]
    pub fn include_carriers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_carriers_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn exclude_carriers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_carriers_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn include_agents<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_agents_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn exclude_agents<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_agents_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn include_sustainability_data(mut self, yes: bool) -> Self {
        self.include_sustainability_data = yes;
        self
    }

    #[must_use]
    pub fn nearby_airports(mut self, yes: bool) -> Self {
        self.nearby_airports = yes;
        self
    }

    /// Check the invariants the vendor would otherwise reject.
    pub fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("market", &self.market),
            ("locale", &self.locale),
            ("currency", &self.currency),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_request(format!(
                    "search query {field} must not be empty"
                )));
            }
        }
        if self.query_legs.is_empty() {
            return Err(Error::invalid_request(
                "search query needs at least one leg",
            ));
        }
        if let Some(index) = self.query_legs.iter().position(|leg| {
            leg.origin_place_id.is_blank()
                || leg.destination_place_id.as_ref().is_some_and(PlaceId::is_blank)
        }) {
            return Err(Error::invalid_request(format!(
                "search query leg {index} has an empty place id"
            )));
        }
        if self.adults < 1 {
            return Err(Error::invalid_request(
                "search query needs at least one adult",
            ));
        }
        Ok(())
    }
}

/// Body of `POST /flights/live/search/create`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateSearchBody<'a> {
    pub(crate) query: &'a SearchQuery,
}

/// Response of both create and poll.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SearchResult {
    pub session_token: SessionToken,
    pub status: ResultStatus,
    pub action: ResultAction,
    pub content: Content,
}

impl SearchResult {
    /// `true` once the vendor will not add more results to this session.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == ResultStatus::COMPLETE
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == ResultStatus::FAILED
    }
}
