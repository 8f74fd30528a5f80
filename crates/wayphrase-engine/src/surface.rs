use tracing::warn;

use wayphrase_core::surface::{MapSurfaceProvider, PlaceEvent};

use crate::controller::AppController;

/// Pump selection activity from a host surface into the controller until
/// the surface shuts down.
///
/// The surface owns only transient markers; this loop keeps them aligned
/// with the controller's place list by echoing marker commands back for
/// every accepted transition. Marker failures are logged and skipped; the
/// controller state, not the surface, is authoritative.
pub async fn drive_surface(surface: &dyn MapSurfaceProvider, controller: &AppController) {
    while let Some(event) = surface.next_event().await {
        match event {
            PlaceEvent::Selected(seed) => {
                let location = seed.location;
                let place = controller.add_place(seed);
                if let Err(err) = surface.add_marker(&place.id, location).await {
                    warn!(place_id = %place.id, error = %err, "failed to add marker");
                }
            }
            PlaceEvent::Removed(id) => {
                if controller.remove_place(&id) {
                    if let Err(err) = surface.remove_marker(&id).await {
                        warn!(place_id = %id, error = %err, "failed to remove marker");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use wayphrase_core::ids::PlaceId;
    use wayphrase_core::place::{Coordinate, PlaceSeed};
    use wayphrase_core::surface::{PlaceSearchProvider, SurfaceError};
    use wayphrase_llm::{MockTextProvider, TextGenProvider};

    fn seed(name: &str, lat: f64, lng: f64) -> PlaceSeed {
        PlaceSeed {
            name: name.into(),
            address: format!("{name} ave"),
            location: Coordinate { lat, lng },
            country_code: "JP".into(),
        }
    }

    fn controller() -> AppController {
        AppController::new(Box::new(|_key| {
            Arc::new(MockTextProvider::new(vec![])) as Arc<dyn TextGenProvider>
        }))
    }

    /// Test double for the map widget: a scripted event feed plus a marker
    /// set the loop is expected to keep in sync.
    struct ScriptedSurface {
        events: Mutex<VecDeque<PlaceEvent>>,
        markers: Mutex<HashSet<PlaceId>>,
    }

    impl ScriptedSurface {
        fn new(events: Vec<PlaceEvent>) -> Self {
            Self {
                events: Mutex::new(events.into()),
                markers: Mutex::new(HashSet::new()),
            }
        }
    }

    #[async_trait]
    impl MapSurfaceProvider for ScriptedSurface {
        async fn add_marker(&self, id: &PlaceId, _location: Coordinate) -> Result<(), SurfaceError> {
            self.markers.lock().insert(id.clone());
            Ok(())
        }

        async fn remove_marker(&self, id: &PlaceId) -> Result<(), SurfaceError> {
            self.markers.lock().remove(id);
            Ok(())
        }

        async fn next_event(&self) -> Option<PlaceEvent> {
            self.events.lock().pop_front()
        }
    }

    struct FixtureSearch {
        catalog: Vec<PlaceSeed>,
    }

    #[async_trait]
    impl PlaceSearchProvider for FixtureSearch {
        async fn search(&self, query: &str) -> Result<Vec<PlaceSeed>, SurfaceError> {
            Ok(self
                .catalog
                .iter()
                .filter(|s| s.name.contains(query))
                .cloned()
                .collect())
        }

        async fn resolve(&self, location: Coordinate) -> Result<PlaceSeed, SurfaceError> {
            self.catalog
                .iter()
                .find(|s| s.location == location)
                .cloned()
                .ok_or_else(|| SurfaceError::Geocoding("no result at coordinate".into()))
        }
    }

    #[tokio::test]
    async fn selections_and_removals_flow_into_the_controller() {
        let controller = controller();
        let cafe = seed("Cafe", 35.66, 139.70);
        let tower = seed("Tower", 35.65, 139.74);
        let cafe_id = PlaceId::from_coords(35.66, 139.70);

        let surface = ScriptedSurface::new(vec![
            PlaceEvent::Selected(cafe),
            PlaceEvent::Selected(tower),
            PlaceEvent::Removed(cafe_id.clone()),
        ]);

        drive_surface(&surface, &controller).await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.places.len(), 1);
        assert_eq!(snapshot.places[0].name, "Tower");
        // Markers mirror the surviving selection.
        let markers = surface.markers.lock();
        assert!(!markers.contains(&cafe_id));
        assert!(markers.contains(&snapshot.places[0].id));
    }

    #[tokio::test]
    async fn duplicate_selection_keeps_one_place_and_one_marker() {
        let controller = controller();
        let surface = ScriptedSurface::new(vec![
            PlaceEvent::Selected(seed("Cafe", 35.66, 139.70)),
            PlaceEvent::Selected(seed("Cafe", 35.66, 139.70)),
        ]);

        drive_surface(&surface, &controller).await;

        assert_eq!(controller.snapshot().places.len(), 1);
        assert_eq!(surface.markers.lock().len(), 1);
    }

    #[tokio::test]
    async fn search_results_can_be_selected() {
        let controller = controller();
        let search = FixtureSearch {
            catalog: vec![seed("Blue Bottle Shibuya", 35.66, 139.70), seed("Tower", 1.0, 2.0)],
        };

        let hits = search.search("Blue Bottle").await.unwrap();
        assert_eq!(hits.len(), 1);

        let place = controller.add_place(hits[0].clone());
        assert_eq!(place.id.as_str(), "35.66_139.7");
        assert_eq!(controller.snapshot().places.len(), 1);
    }

    #[tokio::test]
    async fn map_click_resolves_through_the_search_capability() {
        let search = FixtureSearch {
            catalog: vec![seed("Cafe", 35.66, 139.70)],
        };

        let hit = search.resolve(Coordinate { lat: 35.66, lng: 139.70 }).await.unwrap();
        assert_eq!(hit.name, "Cafe");

        let miss = search.resolve(Coordinate { lat: 0.0, lng: 0.0 }).await;
        assert!(matches!(miss, Err(SurfaceError::Geocoding(_))));
    }
}
