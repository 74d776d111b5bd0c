//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `TransactionId` where a `PersonId` is expected.
//! Rows use SQLite integer primary keys, so every ID wraps an `i64`.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from a raw row id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the inner row id.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

typed_id!(PersonId, "Unique identifier for a person.");
typed_id!(TransactionId, "Unique identifier for a transaction.");
typed_id!(UserId, "Identifier of a chat user owning settings.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = PersonId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<PersonId>().unwrap(), id);
        assert!("abc".parse::<PersonId>().is_err());
    }

    #[test]
    fn test_conversions() {
        let id = TransactionId::from(7);
        assert_eq!(id.into_inner(), 7);
        assert!(PersonId::new(1) < PersonId::new(2));
    }
}
