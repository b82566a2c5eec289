use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(MessageId);

/// Identifier for one of the case's suspects.
///
/// Unlike `MessageId`, suspects are a closed, authored roster, so their IDs
/// are human-readable slugs (`james-blackwood`) rather than UUIDs. Slugs are
/// lowercase ASCII letters, digits, and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    /// Wrap a known-good slug. Content tables use this directly; input from
    /// the API goes through `parse` instead.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid_slug(s: &str) -> bool {
        !s.is_empty()
            && !s.starts_with('-')
            && !s.ends_with('-')
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CharacterId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid_slug(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::invalid_id(format!(
                "not a valid character slug: {s:?}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_slug_round_trip() {
        let id: CharacterId = "james-blackwood".parse().expect("valid slug");
        assert_eq!(id.as_str(), "james-blackwood");
        assert_eq!(id.to_string(), "james-blackwood");
    }

    #[test]
    fn character_slug_rejects_garbage() {
        assert!("James Blackwood".parse::<CharacterId>().is_err());
        assert!("".parse::<CharacterId>().is_err());
        assert!("-leading".parse::<CharacterId>().is_err());
        assert!("trailing-".parse::<CharacterId>().is_err());
    }

    #[test]
    fn message_ids_are_unique() {
        assert_ne!(MessageId::new(), MessageId::new());
    }
}
