use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! branded_id {
    ($name:ident, $prefix:expr) => {
        #[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::now_v7()))
            }

            pub fn from_raw(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

branded_id!(BatchId, "batch");

/// Stable identity of a selected place.
///
/// Derived from the coordinate, not random: re-selecting the same point on
/// the map must resolve to the same id so that duplicate selections collapse
/// and marker removal commands round-trip through the host surface.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    /// Derive the id from a coordinate pair. Identical (lat, lng) inputs
    /// always produce identical ids.
    pub fn from_coords(lat: f64, lng: f64) -> Self {
        Self(format!("{lat}_{lng}"))
    }

    pub fn from_raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlaceId {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl AsRef<str> for PlaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_id_has_prefix() {
        let id = BatchId::new();
        assert!(id.as_str().starts_with("batch_"), "got: {id}");
    }

    #[test]
    fn batch_ids_are_unique() {
        let a = BatchId::new();
        let b = BatchId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn place_id_is_deterministic() {
        let a = PlaceId::from_coords(37.5, 127.0);
        let b = PlaceId::from_coords(37.5, 127.0);
        assert_eq!(a, b);
    }

    #[test]
    fn place_id_format() {
        let id = PlaceId::from_coords(37.5, 127.0);
        assert_eq!(id.as_str(), "37.5_127");

        let id = PlaceId::from_coords(35.6, 139.7);
        assert_eq!(id.as_str(), "35.6_139.7");
    }

    #[test]
    fn place_id_distinguishes_coordinates() {
        let a = PlaceId::from_coords(37.5, 127.0);
        let b = PlaceId::from_coords(37.5, 127.1);
        assert_ne!(a, b);
    }

    #[test]
    fn display_and_from_str_roundtrip() {
        let id = PlaceId::from_coords(48.8584, 2.2945);
        let s = id.to_string();
        let parsed: PlaceId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_roundtrip() {
        let id = PlaceId::from_coords(37.5, 127.0);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"37.5_127\"");
        let parsed: PlaceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
