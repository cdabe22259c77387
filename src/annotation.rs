//! Map annotation items and the tap-to-zoom reverse lookup.
//!
//! `AnnotationItem` is the closed set of marker kinds the map surface can
//! render. Items are created fresh by every clustering pass and replaced
//! wholesale on the next one; there is no diffing and no identity across
//! recomputations.

use crate::cluster::{ProximityCluster, RegionCluster, StateCluster};
use crate::{Coordinate, GranularityLevel, Resort, Viewport};

/// A marker to render on the map: one of the three cluster kinds or an
/// individual resort.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum AnnotationItem {
    Regional(RegionCluster),
    State(StateCluster),
    Proximity(ProximityCluster),
    Resort(Resort),
}

impl AnnotationItem {
    /// Stable identifier for the marker, unique within one clustering pass.
    pub fn id(&self) -> String {
        match self {
            AnnotationItem::Regional(cluster) => format!("region-{}", cluster.region.slug()),
            AnnotationItem::State(cluster) => format!("state-{}", cluster.state_code),
            // Proximity clusters have no natural key; the lowest member id
            // is unique because members belong to exactly one cluster.
            AnnotationItem::Proximity(cluster) => format!("proximity-{}", cluster.resorts[0].id),
            AnnotationItem::Resort(resort) => format!("resort-{}", resort.id),
        }
    }

    /// Where to place the marker.
    pub fn coordinate(&self) -> Coordinate {
        match self {
            AnnotationItem::Regional(cluster) => cluster.coordinate,
            AnnotationItem::State(cluster) => cluster.coordinate,
            AnnotationItem::Proximity(cluster) => cluster.coordinate,
            AnnotationItem::Resort(resort) => resort.coordinate(),
        }
    }

    /// Marker label text.
    pub fn title(&self) -> String {
        match self {
            AnnotationItem::Regional(cluster) => cluster.display_title(),
            AnnotationItem::State(cluster) => cluster.display_title(),
            AnnotationItem::Proximity(cluster) => cluster.display_title(),
            AnnotationItem::Resort(resort) => resort.name.clone(),
        }
    }

    /// Ids of the resorts represented by this marker.
    pub fn resort_ids(&self) -> Vec<String> {
        match self {
            AnnotationItem::Regional(cluster) => {
                cluster.resorts.iter().map(|r| r.id.clone()).collect()
            }
            AnnotationItem::State(cluster) => {
                cluster.resorts.iter().map(|r| r.id.clone()).collect()
            }
            AnnotationItem::Proximity(cluster) => {
                cluster.resorts.iter().map(|r| r.id.clone()).collect()
            }
            AnnotationItem::Resort(resort) => vec![resort.id.clone()],
        }
    }

    /// Number of resorts behind this marker.
    pub fn count(&self) -> usize {
        match self {
            AnnotationItem::Regional(cluster) => cluster.count(),
            AnnotationItem::State(cluster) => cluster.count(),
            AnnotationItem::Proximity(cluster) => cluster.count(),
            AnnotationItem::Resort(_) => 1,
        }
    }

    /// The viewport to frame when this marker is tapped.
    ///
    /// Cluster markers zoom the map in one granularity step: regional markers
    /// frame their region's fixed span, state markers a 3°x3° span at the
    /// state centroid, proximity markers a 0.5°x0.5° span at the cluster
    /// centroid. Individual resort markers return `None`; tapping those opens
    /// the resort detail view instead.
    ///
    /// # Example
    /// ```
    /// use resort_cluster::{AnnotationItem, Resort};
    ///
    /// let single = AnnotationItem::Resort(Resort::new(
    ///     "vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550,
    /// ));
    /// assert!(single.zoom_target().is_none());
    /// ```
    pub fn zoom_target(&self) -> Option<Viewport> {
        match self {
            AnnotationItem::Regional(cluster) => Some(cluster.region.viewport()),
            AnnotationItem::State(cluster) => Some(Viewport::around(cluster.coordinate, 3.0)),
            AnnotationItem::Proximity(cluster) => Some(Viewport::around(cluster.coordinate, 0.5)),
            AnnotationItem::Resort(_) => None,
        }
    }
}

/// Whether per-marker name labels should render at a granularity level.
///
/// Labels only show when every resort has its own marker; cluster markers
/// carry their count in the title instead.
pub fn show_labels(level: GranularityLevel) -> bool {
    level == GranularityLevel::Individual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::SkiRegion;

    fn vail() -> Resort {
        Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550)
    }

    fn breck() -> Resort {
        Resort::new("breck", "Breckenridge", "CO", "Rocky Mountains", 39.4817, -106.0384)
    }

    #[test]
    fn test_show_labels_only_individual() {
        assert!(!show_labels(GranularityLevel::Regional));
        assert!(!show_labels(GranularityLevel::State));
        assert!(!show_labels(GranularityLevel::Proximity));
        assert!(show_labels(GranularityLevel::Individual));
    }

    #[test]
    fn test_regional_zoom_target() {
        let item = AnnotationItem::Regional(RegionCluster::new(
            SkiRegion::RockyMountains,
            vec![vail()],
        ));

        let viewport = item.zoom_target().unwrap();
        assert_eq!(viewport.center, SkiRegion::RockyMountains.center());
        assert_eq!(viewport.lat_delta, 12.0);
        assert_eq!(viewport.lng_delta, 15.0);
    }

    #[test]
    fn test_state_zoom_target() {
        let item = AnnotationItem::State(StateCluster::new("CO".to_string(), vec![vail(), breck()]));

        let viewport = item.zoom_target().unwrap();
        assert_eq!(viewport.lat_delta, 3.0);
        assert_eq!(viewport.lng_delta, 3.0);
        assert_eq!(viewport.center, item.coordinate());
    }

    #[test]
    fn test_proximity_zoom_target() {
        let item = AnnotationItem::Proximity(ProximityCluster::new(vec![vail(), breck()], None));

        let viewport = item.zoom_target().unwrap();
        assert_eq!(viewport.lat_delta, 0.5);
        assert_eq!(viewport.lng_delta, 0.5);
        assert_eq!(viewport.center, item.coordinate());
    }

    #[test]
    fn test_resort_opens_detail_instead() {
        let item = AnnotationItem::Resort(vail());
        assert!(item.zoom_target().is_none());
    }

    #[test]
    fn test_ids_and_titles() {
        let single = AnnotationItem::Resort(vail());
        assert_eq!(single.id(), "resort-vail");
        assert_eq!(single.title(), "Vail");
        assert_eq!(single.count(), 1);

        let state = AnnotationItem::State(StateCluster::new("CO".to_string(), vec![vail(), breck()]));
        assert_eq!(state.id(), "state-CO");
        assert_eq!(state.title(), "CO • 2");
        assert_eq!(state.resort_ids(), vec!["vail", "breck"]);
    }
}
