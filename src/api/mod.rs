//! Flight search API services.
//!
//! The SDK surface is exposed via service accessors on clients:
//! - `Client::flights()` / `BlockingClient::flights()`
//! - `Client::culture()` / `BlockingClient::culture()`
//! - `Client::autosuggest()` / `BlockingClient::autosuggest()`

pub mod autosuggest;
pub mod culture;
pub mod flights;

pub use autosuggest::*;
pub use culture::*;
pub use flights::*;

use crate::Error;

fn require_non_blank(what: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::invalid_request(format!("{what} must not be empty")));
    }
    Ok(())
}
