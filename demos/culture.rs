//! Blocking culture lookups.
//!
//! ```bash
//! cargo run --example culture --no-default-features --features blocking,rustls
//! ```
//!
//! Env vars:
//! - `SKYSCANNER_API_KEY` (required)
//! - `CLIENT_IP` (default: `127.0.0.1`)

use skyscanner_sdk::BlockingClient;

fn main() -> anyhow::Result<()> {
    let Ok(api_key) = std::env::var("SKYSCANNER_API_KEY") else {
        eprintln!("missing SKYSCANNER_API_KEY");
        return Ok(());
    };
    let ip = std::env::var("CLIENT_IP").unwrap_or_else(|_| "127.0.0.1".to_owned());

    let client = BlockingClient::new(api_key)?;
    let culture = client.culture();

    let nearest = culture.nearest_culture(&ip)?;
    println!(
        "{ip}: market={} locale={} currency={}",
        nearest.market.code, nearest.locale.code, nearest.currency.code
    );

    let markets = culture.list_markets(&nearest.locale.code)?;
    println!("{} markets", markets.markets.len());

    let currencies = culture.list_currencies()?;
    if let Some(currency) = currencies
        .currencies
        .iter()
        .find(|c| c.code == nearest.currency.code)
    {
        println!("1234.5 renders as {}", currency.format(1234.5));
    }

    Ok(())
}
