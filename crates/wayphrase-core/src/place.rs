use serde::{Deserialize, Serialize};

use crate::ids::PlaceId;

/// Geographic coordinate in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// A geocoded selection as it arrives from the host surface (map click or
/// autocomplete pick): everything a [`Place`] carries except its identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceSeed {
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    /// ISO 3166-1 alpha-2 code. Empty when geocoding could not resolve one.
    #[serde(default)]
    pub country_code: String,
}

/// A traveler-selected destination with stable identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    #[serde(default)]
    pub country_code: String,
}

impl Place {
    /// Promote a selection to a place, deriving its id from the coordinate.
    pub fn from_seed(seed: PlaceSeed) -> Self {
        let id = PlaceId::from_coords(seed.location.lat, seed.location.lng);
        Self {
            id,
            name: seed.name,
            address: seed.address,
            location: seed.location,
            country_code: seed.country_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(lat: f64, lng: f64) -> PlaceSeed {
        PlaceSeed {
            name: "Cafe Onion".into(),
            address: "Seongsu-dong, Seoul".into(),
            location: Coordinate { lat, lng },
            country_code: "KR".into(),
        }
    }

    #[test]
    fn from_seed_derives_id_from_location() {
        let place = Place::from_seed(seed(37.544, 127.055));
        assert_eq!(place.id.as_str(), "37.544_127.055");
        assert_eq!(place.name, "Cafe Onion");
        assert_eq!(place.country_code, "KR");
    }

    #[test]
    fn same_location_same_identity() {
        let a = Place::from_seed(seed(37.544, 127.055));
        let b = Place::from_seed(seed(37.544, 127.055));
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn seed_deserializes_without_country_code() {
        let json = r#"{"name":"Louvre","address":"Paris","location":{"lat":48.86,"lng":2.33}}"#;
        let seed: PlaceSeed = serde_json::from_str(json).unwrap();
        assert!(seed.country_code.is_empty());
    }
}
