//! Async live search: create a session and poll it until complete.
//!
//! ```bash
//! cargo run --example live_search
//! ```
//!
//! Env vars:
//! - `SKYSCANNER_API_KEY` (required)
//! - `SKYSCANNER_BASE_URL` (optional, e.g. a sandbox)
//! - `ORIGIN_IATA` (default: `LHR`), `DESTINATION_IATA` (default: `JFK`)

use skyscanner_sdk::{CabinClass, Client, LocalDate, PlaceId, QueryLeg, SearchQuery};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(api_key) = env_opt("SKYSCANNER_API_KEY") else {
        eprintln!("missing SKYSCANNER_API_KEY");
        return Ok(());
    };

    let mut builder = Client::builder(api_key).timeout(Duration::from_secs(20));
    if let Some(base_url) = env_opt("SKYSCANNER_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    let query = SearchQuery::new("UK", "en-GB", "GBP")
        .leg(QueryLeg::new(
            PlaceId::iata(env_or("ORIGIN_IATA", "LHR")),
            PlaceId::iata(env_or("DESTINATION_IATA", "JFK")),
            LocalDate::new(2026, 12, 1),
        ))
        .cabin_class(CabinClass::ECONOMY);

    let mut result = client.flights().create_search(&query).await?;
    let token = result.session_token.clone();
    let mut polls = 0;
    while !result.is_complete() && !result.is_failed() && polls < 10 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        result = client.flights().poll_search(&token).await?;
        polls += 1;
    }

    println!(
        "status={} itineraries={}",
        result.status,
        result.content.results.itineraries.len()
    );

    let results = &result.content.results;
    for option in result.content.sorting_options.cheapest.iter().take(5) {
        let Some(itinerary) = results.itineraries.get(&option.itinerary_id) else {
            continue;
        };
        let Some(cheapest) = itinerary.cheapest_option() else {
            continue;
        };
        let price = cheapest.price.to_f64()?;
        println!("{}: {price:.2} GBP", option.itinerary_id);
    }

    Ok(())
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
