//! Typed client for the Skyscanner partner flight search API.
//!
//! Two flavours share one request model and error type:
//! - [`Client`] (feature `async`, default) on `reqwest`
//! - [`BlockingClient`] (feature `blocking`) on `ureq`
//!
//! ```no_run
//! # async fn run() -> Result<(), skyscanner_sdk::Error> {
//! use skyscanner_sdk::{Client, LocalDate, PlaceId, QueryLeg, SearchQuery};
//!
//! let client = Client::new("prtl-api-key")?;
//! let query = SearchQuery::new("UK", "en-GB", "GBP").leg(QueryLeg::new(
//!     PlaceId::iata("LHR"),
//!     PlaceId::iata("JFK"),
//!     LocalDate::new(2026, 12, 1),
//! ));
//! let mut result = client.flights().create_search(&query).await?;
//! while !result.is_complete() && !result.is_failed() {
//!     result = client.flights().poll_search(&result.session_token).await?;
//! }
//! # Ok(())
//! # }
//! ```

// compile-time guard: enable at least one client kind.
#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("Enable at least one of: `async` (default) or `blocking`.");

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod request_hook;
pub mod transport;
pub mod types;

mod util;

pub use auth::{ApiKey, SecretString};
pub use client::DEFAULT_BASE_URL;
#[cfg(feature = "blocking")]
pub use client::{BlockingClient, BlockingClientBuilder};
#[cfg(feature = "async")]
pub use client::{Client, ClientBuilder};
pub use error::{
    BodySnippetConfig, Error, ErrorEnvelope, ErrorKind, HttpError, INTERNAL_ERROR_CODE, Result,
    TransportErrorKind,
};
pub use request_hook::{RequestHook, RequestHookContext};
pub use types::*;
