//! Cluster builder: partitions the resort catalog for the active granularity.
//!
//! Each clustering pass recomputes the partition from scratch; no cluster
//! identity survives a viewport change. Every input resort lands in exactly
//! one cluster or singleton annotation per pass.
//!
//! The proximity pass is the greedy single-scan bucketing the app has always
//! shipped: clusters absorb later points, never the other way around. Input
//! is sorted by resort id first so the same catalog always produces the same
//! partition regardless of how the backend ordered it.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::annotation::AnnotationItem;
use crate::geo_utils::compute_center;
use crate::regions::SkiRegion;
use crate::{Coordinate, GranularityLevel, Resort, Viewport};

/// A named ski area used to label proximity clusters.
///
/// If a proximity cluster contains any resort from the list, the cluster's
/// marker shows the area name instead of a plain count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct NamedArea {
    pub name: String,
    /// Resort names belonging to the area
    pub resorts: Vec<String>,
}

impl NamedArea {
    pub fn new(name: &str, resorts: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            resorts: resorts.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Configuration for the clustering passes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ClusterConfig {
    /// Named-area tables checked when labeling proximity clusters.
    /// Earlier entries win when a cluster intersects more than one.
    pub named_areas: Vec<NamedArea>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            named_areas: vec![
                NamedArea::new(
                    "Summit County",
                    &["Breckenridge", "Keystone", "Copper Mountain", "Arapahoe Basin"],
                ),
                NamedArea::new("Vail Valley", &["Vail", "Beaver Creek"]),
                NamedArea::new(
                    "Cottonwood Canyons",
                    &["Alta", "Snowbird", "Brighton", "Solitude"],
                ),
                NamedArea::new(
                    "Lake Tahoe",
                    &["Palisades Tahoe", "Heavenly", "Northstar", "Kirkwood"],
                ),
            ],
        }
    }
}

impl ClusterConfig {
    /// The area name for a group of resorts, if any table intersects it.
    fn area_name_for(&self, resorts: &[Resort]) -> Option<String> {
        self.named_areas
            .iter()
            .find(|area| resorts.iter().any(|r| area.resorts.contains(&r.name)))
            .map(|area| area.name.clone())
    }
}

// ============================================================================
// Cluster Types
// ============================================================================

/// A regional cluster: all resorts in one of the four fixed US regions.
///
/// The marker sits at the region's hand-assigned center, not at the member
/// centroid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct RegionCluster {
    pub region: SkiRegion,
    pub resorts: Vec<Resort>,
    pub coordinate: Coordinate,
}

impl RegionCluster {
    /// Create a regional cluster. Panics on an empty member list.
    pub fn new(region: SkiRegion, resorts: Vec<Resort>) -> Self {
        assert!(!resorts.is_empty(), "cluster requires at least one member");
        Self {
            region,
            resorts,
            coordinate: region.center(),
        }
    }

    pub fn count(&self) -> usize {
        self.resorts.len()
    }

    pub fn display_title(&self) -> String {
        format!("{} • {}", self.region.name(), self.count())
    }
}

/// A state cluster: all resorts sharing a state code, centered at the
/// arithmetic-mean centroid of the members.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct StateCluster {
    pub state_code: String,
    pub resorts: Vec<Resort>,
    pub coordinate: Coordinate,
}

impl StateCluster {
    /// Create a state cluster. Panics on an empty member list.
    pub fn new(state_code: String, resorts: Vec<Resort>) -> Self {
        assert!(!resorts.is_empty(), "cluster requires at least one member");
        let coords: Vec<Coordinate> = resorts.iter().map(|r| r.coordinate()).collect();
        let coordinate = compute_center(&coords);
        Self { state_code, resorts, coordinate }
    }

    pub fn count(&self) -> usize {
        self.resorts.len()
    }

    pub fn display_title(&self) -> String {
        format!("{} • {}", self.state_code, self.count())
    }
}

/// A proximity cluster: two or more resorts grouped by the greedy
/// distance-based pass, centered at the member centroid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ProximityCluster {
    pub resorts: Vec<Resort>,
    pub coordinate: Coordinate,
    /// Label from the named-area tables, when the members match one
    pub area_name: Option<String>,
}

impl ProximityCluster {
    /// Create a proximity cluster. Panics on an empty member list.
    pub fn new(resorts: Vec<Resort>, area_name: Option<String>) -> Self {
        assert!(!resorts.is_empty(), "cluster requires at least one member");
        let coords: Vec<Coordinate> = resorts.iter().map(|r| r.coordinate()).collect();
        let coordinate = compute_center(&coords);
        Self { resorts, coordinate, area_name }
    }

    pub fn count(&self) -> usize {
        self.resorts.len()
    }

    pub fn display_title(&self) -> String {
        match &self.area_name {
            Some(area) => format!("{} • {}", area, self.count()),
            None => format!("{} resorts", self.count()),
        }
    }
}

// ============================================================================
// Clustering Passes
// ============================================================================

/// Greedy bucketing threshold in degrees for a viewport's zoom level.
///
/// Smaller span = zoomed in = smaller clustering distance. The breakpoints
/// are hand-tuned against the production resort catalog.
pub fn clustering_distance(viewport: &Viewport) -> f64 {
    let zoom = viewport.zoom_level();

    if zoom < 5.0 {
        2.0
    } else if zoom < 7.0 {
        1.0
    } else if zoom < 9.0 {
        0.5
    } else if zoom < 11.0 {
        0.2
    } else {
        0.1
    }
}

/// Partition resorts into the four fixed US regions.
///
/// Each region with at least one member becomes one cluster at the region's
/// fixed coordinate; empty regions are omitted. Resorts whose state is in no
/// region table fall through as individual markers so the partition stays
/// complete.
pub fn cluster_regional(resorts: &[Resort]) -> Vec<AnnotationItem> {
    let mut buckets: Vec<(SkiRegion, Vec<Resort>)> = SkiRegion::ALL
        .into_iter()
        .map(|region| (region, Vec::new()))
        .collect();
    let mut unassigned: Vec<Resort> = Vec::new();

    for resort in resorts {
        match SkiRegion::from_state(&resort.state) {
            Some(region) => {
                let bucket = buckets
                    .iter_mut()
                    .find(|(r, _)| *r == region)
                    .map(|(_, members)| members);
                if let Some(members) = bucket {
                    members.push(resort.clone());
                }
            }
            None => unassigned.push(resort.clone()),
        }
    }

    let mut annotations: Vec<AnnotationItem> = buckets
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(region, members)| AnnotationItem::Regional(RegionCluster::new(region, members)))
        .collect();

    annotations.extend(unassigned.into_iter().map(AnnotationItem::Resort));
    annotations
}

/// Group resorts by exact state code, one centroid-placed cluster per state.
///
/// Output is ordered by state code for deterministic results.
pub fn cluster_by_state(resorts: &[Resort]) -> Vec<AnnotationItem> {
    let mut by_state: BTreeMap<String, Vec<Resort>> = BTreeMap::new();

    for resort in resorts {
        by_state
            .entry(resort.state.clone())
            .or_default()
            .push(resort.clone());
    }

    by_state
        .into_iter()
        .map(|(state, members)| AnnotationItem::State(StateCluster::new(state, members)))
        .collect()
}

/// Greedy single-pass proximity bucketing.
///
/// Resorts are processed in id order. Each unprocessed resort opens a new
/// cluster, then absorbs every remaining unprocessed resort whose absolute
/// latitude AND longitude differences are both under the zoom-dependent
/// threshold. Once assigned, a resort is never reconsidered, so two clusters
/// formed back to back are never merged even when they end up adjacent.
/// Groups of one are emitted as individual markers.
pub fn cluster_by_proximity(
    resorts: &[Resort],
    viewport: &Viewport,
    config: &ClusterConfig,
) -> Vec<AnnotationItem> {
    let distance = clustering_distance(viewport);

    let mut ordered: Vec<&Resort> = resorts.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut processed: HashSet<&str> = HashSet::new();
    let mut annotations: Vec<AnnotationItem> = Vec::new();

    for resort in &ordered {
        if processed.contains(resort.id.as_str()) {
            continue;
        }
        processed.insert(resort.id.as_str());

        let mut members: Vec<Resort> = vec![(*resort).clone()];

        for other in &ordered {
            if processed.contains(other.id.as_str()) {
                continue;
            }

            let lat_diff = (resort.latitude - other.latitude).abs();
            let lng_diff = (resort.longitude - other.longitude).abs();

            if lat_diff < distance && lng_diff < distance {
                processed.insert(other.id.as_str());
                members.push((*other).clone());
            }
        }

        if members.len() > 1 {
            let area_name = config.area_name_for(&members);
            annotations.push(AnnotationItem::Proximity(ProximityCluster::new(
                members, area_name,
            )));
        } else {
            annotations.push(AnnotationItem::Resort(members.remove(0)));
        }
    }

    annotations
}

/// No clustering: every resort becomes its own marker.
pub fn cluster_individual(resorts: &[Resort]) -> Vec<AnnotationItem> {
    resorts
        .iter()
        .cloned()
        .map(AnnotationItem::Resort)
        .collect()
}

/// Build the annotation list for a viewport.
///
/// Classifies the viewport into a granularity level, then dispatches to the
/// matching clustering pass. Empty input yields an empty list.
///
/// # Example
/// ```
/// use resort_cluster::{build_annotations, ClusterConfig, Coordinate, Resort, Viewport};
///
/// let resorts = vec![
///     Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550),
///     Resort::new("stowe", "Stowe", "VT", "Northeast", 44.5303, -72.7814),
/// ];
///
/// // Street-level viewport: one marker per resort
/// let viewport = Viewport::new(Coordinate::new(39.6, -106.3), 0.5, 0.5);
/// let annotations = build_annotations(&resorts, &viewport, &ClusterConfig::default());
/// assert_eq!(annotations.len(), 2);
/// ```
pub fn build_annotations(
    resorts: &[Resort],
    viewport: &Viewport,
    config: &ClusterConfig,
) -> Vec<AnnotationItem> {
    let level = viewport.granularity();
    debug!(
        "clustering {} resorts at {:?} (span {:.2}°)",
        resorts.len(),
        level,
        viewport.lng_delta
    );

    match level {
        GranularityLevel::Regional => cluster_regional(resorts),
        GranularityLevel::State => cluster_by_state(resorts),
        GranularityLevel::Proximity => cluster_by_proximity(resorts, viewport, config),
        GranularityLevel::Individual => cluster_individual(resorts),
    }
}

/// Build annotation lists for several viewports in parallel.
///
/// Lets the app prefetch the annotation set for every zoom level in one call.
/// Results are in the same order as the input viewports.
#[cfg(feature = "parallel")]
pub fn build_annotations_batch(
    resorts: &[Resort],
    viewports: &[Viewport],
    config: &ClusterConfig,
) -> Vec<Vec<AnnotationItem>> {
    use rayon::prelude::*;

    viewports
        .par_iter()
        .map(|viewport| build_annotations(resorts, viewport, config))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
