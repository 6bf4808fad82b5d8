//! Newtype wrappers around `String` for seat identifiers and claim tokens.
//!
//! Using distinct types prevents accidentally passing a `ClaimToken` where a
//! `SeatId` is expected. Both serialize transparently as plain strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Macro to define a newtype identifier wrapper around `String`.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw value, rejecting blank input.
            pub fn new(raw: impl Into<String>) -> Result<Self, AppError> {
                let raw = raw.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(AppError::validation(concat!($label, " must not be empty")));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Return the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the inner string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_string_id!(
    /// Stable identifier of a seat, e.g. `A1`.
    SeatId, "seat id"
);

define_string_id!(
    /// Opaque proof of ownership of a claim. Only equality is meaningful.
    ClaimToken, "token"
);
