//! Validated identifier newtypes.
//!
//! Identifiers are parsed once at the boundary and carried as semantic
//! types throughout the domain. Construction rejects empty, oversized, or
//! out-of-charset values; valid instances cannot represent invalid state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum length for any identifier.
const MAX_ID_LENGTH: usize = 64;

fn validate_id(kind: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(format!("{kind} id cannot be empty")));
    }
    if value.len() > MAX_ID_LENGTH {
        return Err(Error::validation(format!(
            "{kind} id exceeds maximum length of {MAX_ID_LENGTH}"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::validation(format!(
            "{kind} id must contain only alphanumeric characters, hyphens, and underscores"
        )));
    }
    Ok(())
}

macro_rules! identifier {
    ($(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, validating the input.
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                validate_id($kind, &value)?;
                Ok(Self(value))
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }
    };
}

identifier!(
    /// A validated ranch identifier.
    RanchId,
    "ranch"
);

identifier!(
    /// A validated pasture identifier, unique within its parent ranch.
    PastureId,
    "pasture"
);

identifier!(
    /// A validated identifier for the user owning a ranch.
    OwnerId,
    "owner"
);

impl RanchId {
    /// Derive a time-based ranch id from the caller's clock value.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(format!("rn-{}", now.timestamp_millis()))
    }
}

impl PastureId {
    /// Derive a time-based pasture id from the caller's clock value.
    ///
    /// The store uniquifies the result within one ranch, so two pastures
    /// created in the same millisecond still get distinct ids.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(format!("pz-{}", now.timestamp_millis()))
    }
}
