//! Typed identifiers.
//!
//! Plants are identified by plain strings because that is what the device
//! firmware and the mobile client put on the wire; records and events get
//! UUID-backed newtypes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of a monitored plant.
///
/// The deployment supports a single plant, identified by
/// [`PlantId::MAIN`]; requests that omit a plant id resolve to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(String);

impl PlantId {
    /// The identifier of the one supported plant.
    pub const MAIN: &'static str = "main_plant";

    /// Wrap a non-empty identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPlantId`] for an empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyPlantId);
        }
        Ok(Self(id))
    }

    /// The default plant for requests that do not name one.
    #[must_use]
    pub fn main() -> Self {
        Self(Self::MAIN.to_string())
    }

    /// Access the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PlantId {
    fn default() -> Self {
        Self::main()
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PlantId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

macro_rules! define_uuid_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_uuid_id!(
    /// Unique identifier for a history record.
    RecordId
);

define_uuid_id!(
    /// Unique identifier for an [`Event`](crate::event::Event).
    EventId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_empty_plant_id() {
        assert_eq!(PlantId::new(""), Err(ValidationError::EmptyPlantId));
    }

    #[test]
    fn should_default_to_main_plant() {
        assert_eq!(PlantId::default().as_str(), "main_plant");
    }

    #[test]
    fn should_roundtrip_plant_id_through_serde_json() {
        let id = PlantId::new("main_plant").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"main_plant\"");
        let parsed: PlantId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_generate_unique_record_ids_when_called_twice() {
        let a = RecordId::new();
        let b = RecordId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_record_id_through_display_and_from_str() {
        let id = RecordId::new();
        let text = id.to_string();
        let parsed: RecordId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_return_error_when_parsing_invalid_uuid() {
        let result = EventId::from_str("not-a-uuid");
        assert!(result.is_err());
    }
}
