//! Wire types of the flights, culture and autosuggest APIs.
//!
//! Categorical values are modelled as string newtypes with one associated
//! constant per known wire value, so values added by the vendor later still
//! round-trip unchanged.

/// Declares a lossless string-backed categorical type.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal, )+
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(std::borrow::Cow<'static, str>);

        impl $name {
            $(
                $(#[$vmeta])*
                pub const $variant: Self = Self(std::borrow::Cow::Borrowed($wire));
            )+

            const KNOWN: &'static [&'static str] = &[$($wire),+];

            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(std::borrow::Cow::Owned(value.into()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the value is one of the wire values this SDK knows about.
            #[must_use]
            pub fn is_known(&self) -> bool {
                Self::KNOWN.contains(&self.as_str())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

pub mod autosuggest;
pub mod common;
pub mod culture;
pub mod results;
pub mod search;

pub use autosuggest::*;
pub use common::*;
pub use culture::*;
pub use results::*;
pub use search::*;
