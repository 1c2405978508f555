//! Strongly-typed ID wrappers
//!
//! Expense identifiers are opaque UUIDs. The short display form (`exp-` plus
//! the first eight hex digits) is what the history view prints and what the
//! CLI accepts back for deletion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Check whether `reference` names this ID.
            ///
            /// Accepts the full UUID, the short display form, or a bare hex
            /// prefix of at least four characters.
            pub fn matches(&self, reference: &str) -> bool {
                let reference = reference.trim().to_lowercase();
                let reference = reference
                    .strip_prefix($display_prefix)
                    .unwrap_or(&reference);
                let full = self.0.to_string();
                if reference == full {
                    return true;
                }
                let simple = self.0.simple().to_string();
                reference.len() >= 4 && !reference.contains('-') && simple.starts_with(reference)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");

#[cfg(test)]
mod tests {
    use super::*;

    const UUID: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_id_creation() {
        let id = ExpenseId::new();
        assert!(!id.as_uuid().is_nil());
        assert_ne!(id, ExpenseId::new());
    }

    #[test]
    fn test_id_display() {
        let id: ExpenseId = UUID.parse().unwrap();
        assert_eq!(id.to_string(), "exp-550e8400");
    }

    #[test]
    fn test_id_matches() {
        let id: ExpenseId = UUID.parse().unwrap();
        assert!(id.matches(UUID));
        assert!(id.matches("exp-550e8400"));
        assert!(id.matches("550e"));
        assert!(id.matches("EXP-550E8400"));
        assert!(!id.matches("550"));
        assert!(!id.matches("exp-deadbeef"));
    }

    #[test]
    fn test_id_serialization() {
        let id = ExpenseId::from_uuid(Uuid::parse_str(UUID).unwrap());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", UUID));
        let deserialized: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
