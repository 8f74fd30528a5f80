use async_trait::async_trait;

use crate::ids::PlaceId;
use crate::place::{Coordinate, PlaceSeed};

/// Failure reported by a host surface capability.
#[derive(Clone, Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("geocoding failed: {0}")]
    Geocoding(String),
    #[error("surface unavailable: {0}")]
    Unavailable(String),
}

/// Selection activity flowing from the host surface into the controller.
#[derive(Clone, Debug)]
pub enum PlaceEvent {
    Selected(PlaceSeed),
    Removed(PlaceId),
}

/// Autocomplete/search capability of the host platform.
///
/// Browsers back this with the mapping SDK's places service; tests back it
/// with canned fixtures. The core never links against a mapping SDK.
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    /// Free-text search returning geocoded candidates.
    async fn search(&self, query: &str) -> Result<Vec<PlaceSeed>, SurfaceError>;

    /// Reverse-geocode a raw coordinate (a map click) into a selection.
    async fn resolve(&self, location: Coordinate) -> Result<PlaceSeed, SurfaceError>;
}

/// The visual map the traveler interacts with.
///
/// The surface owns only transient markers keyed by [`PlaceId`]; the
/// controller owns the place list itself.
#[async_trait]
pub trait MapSurfaceProvider: Send + Sync {
    /// Show a marker for a selected place.
    async fn add_marker(&self, id: &PlaceId, location: Coordinate) -> Result<(), SurfaceError>;

    /// Drop the marker for a removed place.
    async fn remove_marker(&self, id: &PlaceId) -> Result<(), SurfaceError>;

    /// Next selection/removal event from the surface, or `None` once the
    /// surface has shut down.
    async fn next_event(&self) -> Option<PlaceEvent>;
}
