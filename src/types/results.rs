//! Search content: normalized results keyed by synthetic ids, stats and sorting.
//!
//! Itineraries reference legs by id and legs reference segments, places and
//! carriers by id. Referential integrity is the vendor's contract; the lookup
//! helpers here yield `None` for dangling ids instead of failing.

use super::{LocalDateTime, Price};
use serde::Deserialize;
use std::collections::HashMap;

wire_enum! {
    /// How connections inside a pricing option are protected.
    pub struct TransferType {
        UNSPECIFIED = "TRANSFER_TYPE_UNSPECIFIED",
        /// Protected transfer managed by the agent: missed connections are rebooked at no cost.
        MANAGED = "TRANSFER_TYPE_MANAGED",
        /// Unprotected transfer with separate booking references.
        SELF_TRANSFER = "TRANSFER_TYPE_SELF_TRANSFER",
        /// Self transfer protected by the travel agent rather than the airline.
        ///
        /// Shares its wire value with [`TransferType::UNSPECIFIED`]; the distinct
        /// vendor constant has not been confirmed, so responses never decode to a
        /// value distinguishable from `UNSPECIFIED`.
        PROTECTED_SELF_TRANSFER = "TRANSFER_TYPE_UNSPECIFIED",
    }
    default = UNSPECIFIED;
}

wire_enum! {
    pub struct PlaceType {
        UNSPECIFIED = "PLACE_TYPE_UNSPECIFIED",
        AIRPORT = "PLACE_TYPE_AIRPORT",
        CITY = "PLACE_TYPE_CITY",
        COUNTRY = "PLACE_TYPE_COUNTRY",
        CONTINENT = "PLACE_TYPE_CONTINENT",
    }
    default = UNSPECIFIED;
}

wire_enum! {
    pub struct AgentType {
        UNSPECIFIED = "AGENT_TYPE_UNSPECIFIED",
        TRAVEL_AGENT = "AGENT_TYPE_TRAVEL_AGENT",
        AIRLINE = "AGENT_TYPE_AIRLINE",
    }
    default = UNSPECIFIED;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Content {
    pub results: Results,
    pub stats: Stats,
    pub sorting_options: SortingOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Results {
    pub itineraries: HashMap<String, Itinerary>,
    pub legs: HashMap<String, Leg>,
    pub segments: HashMap<String, Segment>,
    pub places: HashMap<String, Place>,
    pub carriers: HashMap<String, Carrier>,
    pub agents: HashMap<String, Agent>,
    pub alliances: HashMap<String, Alliance>,
}

impl Results {
    /// Legs of an itinerary in order, `None` where the id is missing from `legs`.
    pub fn itinerary_legs<'a>(
        &'a self,
        itinerary: &'a Itinerary,
    ) -> impl Iterator<Item = (&'a str, Option<&'a Leg>)> + 'a {
        itinerary
            .leg_ids
            .iter()
            .map(|id| (id.as_str(), self.legs.get(id)))
    }

    /// Segments of a leg in order, `None` where the id is missing from `segments`.
    pub fn leg_segments<'a>(
        &'a self,
        leg: &'a Leg,
    ) -> impl Iterator<Item = (&'a str, Option<&'a Segment>)> + 'a {
        leg.segment_ids
            .iter()
            .map(|id| (id.as_str(), self.segments.get(id)))
    }

    #[must_use]
    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.get(id)
    }

    #[must_use]
    pub fn carrier(&self, id: &str) -> Option<&Carrier> {
        self.carriers.get(id)
    }

    #[must_use]
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.get(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Itinerary {
    pub pricing_options: Vec<PricingOption>,
    pub leg_ids: Vec<String>,
    pub sustainability_data: SustainabilityData,
}

impl Itinerary {
    /// Pricing option with the lowest parseable price.
    #[must_use]
    pub fn cheapest_option(&self) -> Option<&PricingOption> {
        self.pricing_options
            .iter()
            .filter_map(|option| option.price.to_f64().ok().map(|value| (value, option)))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, option)| option)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PricingOption {
    pub price: Price,
    pub agent_ids: Vec<String>,
    pub items: Vec<PricingItem>,
    pub transfer_type: TransferType,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PricingItem {
    pub price: Price,
    pub agent_id: String,
    pub deep_link: String,
    pub fares: Vec<Fare>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Fare {
    pub segment_id: String,
    pub booking_code: String,
    pub fare_basis_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SustainabilityData {
    pub is_eco_contender: bool,
    pub eco_contender_delta: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Leg {
    pub origin_place_id: String,
    pub destination_place_id: String,
    pub departure_date_time: LocalDateTime,
    pub arrival_date_time: LocalDateTime,
    pub duration_in_minutes: i32,
    pub stop_count: i32,
    pub marketing_carrier_ids: Vec<String>,
    pub operating_carrier_ids: Vec<String>,
    pub segment_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Segment {
    pub origin_place_id: String,
    pub destination_place_id: String,
    pub departure_date_time: LocalDateTime,
    pub arrival_date_time: LocalDateTime,
    pub duration_in_minutes: i32,
    pub marketing_flight_number: String,
    pub marketing_carrier_ids: Vec<String>,
    pub operating_carrier_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Place {
    /// Internal vendor id, meaningless outside the API.
    pub entity_id: String,
    /// Enclosing place, e.g. the city of an airport.
    pub parent_id: String,
    /// Localised name.
    pub name: String,
    #[serde(rename = "type")]
    pub place_type: PlaceType,
    /// Only set for airports and cities.
    pub iata: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Carrier {
    pub name: String,
    pub alliance_id: String,
    pub image_url: String,
    pub iata: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Agent {
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    pub image_url: String,
    /// Number of users who left feedback.
    pub feedback_count: i32,
    pub rating: f32,
    pub rating_breakdown: AgentRatingBreakdown,
    pub is_optimised_for_mobile: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct AgentRatingBreakdown {
    pub customer_service: f32,
    pub reliable_prices: f32,
    pub clear_extra_fees: f32,
    pub ease_of_booking: f32,
    pub other: f32,
}

/// Airline alliance, e.g. Star Alliance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Alliance {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Stats {
    pub itineraries: ItineraryStats,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ItineraryStats {
    pub min_duration: i32,
    pub max_duration: i32,
    pub total: ItinerarySummary,
    pub stops: StopStats,
    /// Whether any itinerary changes airport during a transfer.
    pub has_change_airport_transfer: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ItinerarySummary {
    pub count: i32,
    pub min_price: Price,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct StopStats {
    pub direct: StopSummary,
    pub one_stop: StopSummary,
    pub two_plus_stops: StopSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct StopSummary {
    pub total: ItinerarySummary,
    pub ticket_types: TicketTypeStats,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct TicketTypeStats {
    pub single_ticket: ItinerarySummary,
    pub multi_ticket_non_npt: ItinerarySummary,
    pub multi_ticket_npt: ItinerarySummary,
}

/// Itinerary rankings computed by the vendor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct SortingOptions {
    pub best: Vec<SortingOption>,
    pub cheapest: Vec<SortingOption>,
    pub fastest: Vec<SortingOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SortingOption {
    pub score: f32,
    pub itinerary_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PriceUnit;
    use serde_json::json;

    fn sample() -> Content {
        serde_json::from_value(json!({
            "results": {
                "itineraries": {
                    "it-1": {
                        "legIds": ["leg-1", "leg-missing"],
                        "pricingOptions": [
                            {"price": {"amount": "120500", "unit": "PRICE_UNIT_MILLI"},
                             "agentIds": ["ag"], "transferType": "TRANSFER_TYPE_MANAGED"},
                            {"price": {"amount": "98000", "unit": "PRICE_UNIT_MILLI"},
                             "agentIds": ["ba"],
                             "items": [{"agentId": "ba", "deepLink": "https://x",
                                        "fares": [{"segmentId": "seg-1", "bookingCode": "Q"}]}]},
                            {"price": {"amount": "n/a"}}
                        ]
                    }
                },
                "legs": {
                    "leg-1": {
                        "originPlaceId": "95565050",
                        "destinationPlaceId": "95565059",
                        "departureDateTime": {"year": 2026, "month": 12, "day": 1, "hour": 9},
                        "durationInMinutes": 75,
                        "segmentIds": ["seg-1", "seg-2"]
                    }
                },
                "segments": {
                    "seg-1": {"marketingFlightNumber": "BA1234", "marketingCarrierIds": ["-32480"]}
                },
                "places": {
                    "95565050": {"entityId": "95565050", "name": "London Heathrow",
                                 "type": "PLACE_TYPE_AIRPORT", "iata": "LHR"}
                },
                "agents": {
                    "ba": {"name": "British Airways", "type": "AGENT_TYPE_AIRLINE", "rating": 4.5}
                }
            },
            "stats": {
                "itineraries": {
                    "minDuration": 75,
                    "total": {"count": 1, "minPrice": {"amount": "98000", "unit": "PRICE_UNIT_MILLI"}},
                    "stops": {"direct": {"total": {"count": 1}}}
                }
            },
            "sortingOptions": {
                "cheapest": [{"score": 1.0, "itineraryId": "it-1"}]
            }
        }))
        .unwrap()
    }

    #[test]
    fn resolves_references_and_reports_dangling_ids() {
        let content = sample();
        let results = &content.results;
        let itinerary = &results.itineraries["it-1"];

        let legs: Vec<_> = results.itinerary_legs(itinerary).collect();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].0, "leg-1");
        assert!(legs[0].1.is_some());
        assert_eq!(legs[1], ("leg-missing", None));

        let leg = legs[0].1.unwrap();
        let segments: Vec<_> = results.leg_segments(leg).collect();
        assert_eq!(segments[0].1.unwrap().marketing_flight_number, "BA1234");
        assert!(segments[1].1.is_none());

        let origin = results.place(&leg.origin_place_id).unwrap();
        assert_eq!(origin.place_type, PlaceType::AIRPORT);
        assert_eq!(origin.iata, "LHR");
        assert_eq!(results.agent("ba").unwrap().agent_type, AgentType::AIRLINE);
    }

    #[test]
    fn cheapest_option_skips_unparseable_prices() {
        let content = sample();
        let itinerary = &content.results.itineraries["it-1"];
        let cheapest = itinerary.cheapest_option().unwrap();
        assert_eq!(cheapest.agent_ids, ["ba"]);
        assert_eq!(cheapest.price.to_f64().unwrap(), 98.0);
        assert_eq!(cheapest.items[0].fares[0].booking_code, "Q");
        assert_eq!(cheapest.transfer_type, TransferType::UNSPECIFIED);
    }

    #[test]
    fn stats_and_sorting_decode() {
        let content = sample();
        let stats = &content.stats.itineraries;
        assert_eq!(stats.min_duration, 75);
        assert_eq!(stats.total.min_price.unit, PriceUnit::MILLI);
        assert_eq!(stats.stops.direct.total.count, 1);
        assert_eq!(stats.stops.one_stop.total.count, 0);
        assert_eq!(content.sorting_options.cheapest[0].itinerary_id, "it-1");
        assert!(content.sorting_options.best.is_empty());
    }

    #[test]
    fn protected_self_transfer_shares_the_unspecified_wire_value() {
        assert_eq!(
            TransferType::PROTECTED_SELF_TRANSFER.as_str(),
            TransferType::UNSPECIFIED.as_str()
        );
        let managed: TransferType = serde_json::from_str(r#""TRANSFER_TYPE_MANAGED""#).unwrap();
        assert_eq!(managed, TransferType::MANAGED);
    }
}
