//! Remote identifiers
//!
//! The backend is not consistent about identifier types: the same record can
//! come back as `7` in one payload and `"7"` in another. Identifiers are kept
//! as text and compared leniently with [`RecordId::matches`].

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! remote_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                let raw = raw.into();
                Self(raw.trim().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn as_number(&self) -> Option<i64> {
                self.0.parse().ok()
            }

            /// Exact text match, or numeric equality when both sides are
            /// integers (`"007"` matches `7`).
            pub fn matches(&self, other: &Self) -> bool {
                if self.0 == other.0 {
                    return true;
                }
                match (self.as_number(), other.as_number()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value.to_string())
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

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                // Canonical integers go out as JSON numbers, like the backend sends them.
                match self.as_number() {
                    Some(n) if n.to_string() == self.0 => serializer.serialize_i64(n),
                    _ => serializer.serialize_str(&self.0),
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer
                    .deserialize_any(IdentifierVisitor)
                    .map(Self::new)
            }
        }
    };
}

struct IdentifierVisitor;

impl<'de> Visitor<'de> for IdentifierVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an identifier as a string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        if v.trim().is_empty() {
            return Err(E::custom("identifier must not be empty"));
        }
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        self.visit_str(&v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

remote_identifier!(
    /// Identifier of a rate tier (`jpr_id`).
    RateTierId
);

remote_identifier!(
    /// Identifier of a parking record (`prk_id`).
    RecordId
);
