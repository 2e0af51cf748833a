//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

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

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form used in listings, e.g. `grp-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Whether `text` names this ID, either as the full UUID or as the
            /// (possibly prefixed) leading hex digits shown in listings
            pub fn matches(&self, text: &str) -> bool {
                let text = text.trim();
                if let Ok(uuid) = Uuid::parse_str(text) {
                    return uuid == self.0;
                }
                let hex = text.strip_prefix($display_prefix).unwrap_or(text);
                hex.len() >= 4 && self.0.simple().to_string().starts_with(&hex.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.short())
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

define_id!(GroupId, "grp-");
define_id!(MemberId, "mem-");
define_id!(GroupExpenseId, "gxp-");
define_id!(ExpenseId, "exp-");
define_id!(PasswordId, "pwd-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = GroupId::new();
        let display = id.to_string();
        assert!(display.starts_with("grp-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_equality() {
        let id1 = MemberId::new();
        let id2 = id1;
        assert_eq!(id1, id2);
        assert_ne!(id1, MemberId::new());
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = ExpenseId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));

        let deserialized: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_from_str_accepts_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let plain: PasswordId = uuid_str.parse().unwrap();
        let prefixed: PasswordId = format!("pwd-{}", uuid_str).parse().unwrap();
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn test_matches_short_form() {
        let id = GroupId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap());
        assert!(id.matches("grp-550e8400"));
        assert!(id.matches("550e8400"));
        assert!(id.matches("550E"));
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches("grp-"));
        assert!(!id.matches("grp-660e8400"));
        assert!(!id.matches("550"));
    }
}
