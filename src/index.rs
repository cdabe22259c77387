//! Spatial index over the resort catalog.
//!
//! Wraps an R-tree so the map surface can cheaply answer "which resorts are
//! visible" before a clustering pass, plus nearest-resort and radius queries
//! for search features. The index is built once per catalog load; clustering
//! itself never mutates it.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::geo_utils::{haversine_distance, meters_to_degrees};
use crate::{Coordinate, Resort, Viewport};

/// R-tree entry: a resort keyed by its (lng, lat) position.
#[derive(Debug, Clone)]
struct IndexedResort {
    resort: Resort,
}

impl RTreeObject for IndexedResort {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.resort.longitude, self.resort.latitude])
    }
}

impl PointDistance for IndexedResort {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        // Squared degree-space distance; only used for nearest-neighbor
        // ordering, never reported as a real distance.
        let dx = self.resort.longitude - point[0];
        let dy = self.resort.latitude - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over a resort catalog.
///
/// # Example
/// ```
/// use resort_cluster::{Coordinate, Resort, ResortIndex, Viewport};
///
/// let index = ResortIndex::new(&[
///     Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550),
///     Resort::new("stowe", "Stowe", "VT", "Northeast", 44.5303, -72.7814),
/// ]);
///
/// let colorado = Viewport::around(Coordinate::new(39.5, -106.0), 4.0);
/// let visible = index.visible(&colorado);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].id, "vail");
/// ```
#[derive(Debug, Clone)]
pub struct ResortIndex {
    tree: RTree<IndexedResort>,
}

impl ResortIndex {
    /// Build an index from a resort catalog. Invalid coordinates are skipped.
    pub fn new(resorts: &[Resort]) -> Self {
        let entries: Vec<IndexedResort> = resorts
            .iter()
            .filter(|r| r.is_valid())
            .map(|r| IndexedResort { resort: r.clone() })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed resorts.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Resorts inside the viewport, for feeding a clustering pass.
    pub fn visible(&self, viewport: &Viewport) -> Vec<&Resort> {
        let (min_lat, max_lat, min_lng, max_lng) = viewport.corners();
        let envelope = AABB::from_corners([min_lng, min_lat], [max_lng, max_lat]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| &entry.resort)
            .collect()
    }

    /// The resort closest to a coordinate, if the index is non-empty.
    pub fn nearest(&self, coordinate: &Coordinate) -> Option<&Resort> {
        self.tree
            .nearest_neighbor(&[coordinate.longitude, coordinate.latitude])
            .map(|entry| &entry.resort)
    }

    /// All resorts within `radius_meters` of a coordinate, closest first.
    ///
    /// Uses a square envelope pre-filter in degree space, then an exact
    /// haversine check.
    pub fn within_radius(&self, coordinate: &Coordinate, radius_meters: f64) -> Vec<&Resort> {
        let radius_deg = meters_to_degrees(radius_meters, coordinate.latitude);
        let envelope = AABB::from_corners(
            [
                coordinate.longitude - radius_deg,
                coordinate.latitude - radius_deg,
            ],
            [
                coordinate.longitude + radius_deg,
                coordinate.latitude + radius_deg,
            ],
        );

        let mut hits: Vec<(f64, &Resort)> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|entry| {
                let dist = haversine_distance(coordinate, &entry.resort.coordinate());
                (dist <= radius_meters).then_some((dist, &entry.resort))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().map(|(_, resort)| resort).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Resort> {
        vec![
            Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550),
            Resort::new("breck", "Breckenridge", "CO", "Rocky Mountains", 39.4817, -106.0384),
            Resort::new("alta", "Alta", "UT", "Rocky Mountains", 40.5883, -111.6358),
            Resort::new("stowe", "Stowe", "VT", "Northeast", 44.5303, -72.7814),
        ]
    }

    #[test]
    fn test_visible_in_viewport() {
        let index = ResortIndex::new(&catalog());
        let colorado = Viewport::around(Coordinate::new(39.5, -106.2), 2.0);

        let mut ids: Vec<&str> = index.visible(&colorado).iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["breck", "vail"]);
    }

    #[test]
    fn test_visible_empty_region() {
        let index = ResortIndex::new(&catalog());
        let atlantic = Viewport::around(Coordinate::new(35.0, -40.0), 5.0);
        assert!(index.visible(&atlantic).is_empty());
    }

    #[test]
    fn test_nearest() {
        let index = ResortIndex::new(&catalog());
        let denver = Coordinate::new(39.7392, -104.9903);

        let nearest = index.nearest(&denver).unwrap();
        assert_eq!(nearest.id, "breck");
    }

    #[test]
    fn test_nearest_empty_index() {
        let index = ResortIndex::new(&[]);
        assert!(index.nearest(&Coordinate::new(39.0, -106.0)).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_within_radius() {
        let index = ResortIndex::new(&catalog());
        let vail = Coordinate::new(39.6061, -106.3550);

        // Breckenridge is ~30km from Vail; Alta is ~460km away
        let near = index.within_radius(&vail, 50_000.0);
        let ids: Vec<&str> = near.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["vail", "breck"]);

        let far = index.within_radius(&vail, 500_000.0);
        assert_eq!(far.len(), 3);
        assert_eq!(far[0].id, "vail"); // closest first
    }

    #[test]
    fn test_invalid_coordinates_skipped() {
        let mut resorts = catalog();
        resorts.push(Resort::new("bad", "Bad", "CO", "Rocky Mountains", 99.0, 0.0));

        let index = ResortIndex::new(&resorts);
        assert_eq!(index.len(), 4);
    }
}
