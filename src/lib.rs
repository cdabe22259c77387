//! # Resort Cluster
//!
//! High-performance map marker clustering for ski resort maps.
//!
//! This library provides:
//! - Zoom-dependent clustering of resort pins (regional, state, proximity, individual)
//! - A tap-to-zoom reverse lookup from cluster markers to map viewports
//! - A spatial index for viewport and radius queries over the resort catalog
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch precomputation with rayon
//! - **`serde`** - Enable serde derives on the data model + JSON catalog parsing
//! - **`http`** - Enable HTTP client for resort catalog fetching
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use resort_cluster::{build_annotations, ClusterConfig, Coordinate, Resort, Viewport};
//!
//! let resorts = vec![
//!     Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550),
//!     Resort::new("steamboat", "Steamboat Springs", "CO", "Rocky Mountains", 40.4850, -106.8317),
//!     Resort::new("stowe", "Stowe", "VT", "Northeast", 44.5303, -72.7814),
//! ];
//!
//! // A continent-wide viewport clusters by region
//! let viewport = Viewport::new(Coordinate::new(39.8, -98.5), 40.0, 60.0);
//! let annotations = build_annotations(&resorts, &viewport, &ClusterConfig::default());
//!
//! for item in &annotations {
//!     println!("{} at ({:.2}, {:.2})", item.title(), item.coordinate().latitude, item.coordinate().longitude);
//! }
//! assert_eq!(annotations.len(), 2); // Rocky Mountains + Northeast
//! ```

pub mod annotation;
pub mod cluster;
pub mod engine;
pub mod geo_utils;
pub mod index;
pub mod regions;

// HTTP module for resort catalog fetching
#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{CatalogResult, ResortFetcher};

pub use annotation::{show_labels, AnnotationItem};
pub use cluster::{
    build_annotations, cluster_by_proximity, cluster_by_state, cluster_individual,
    cluster_regional, clustering_distance, ClusterConfig, NamedArea, ProximityCluster,
    RegionCluster, StateCluster,
};
pub use engine::ClusterEngine;
pub use index::ResortIndex;
pub use regions::SkiRegion;

#[cfg(feature = "parallel")]
pub use cluster::build_annotations_batch;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("ResortClusterRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use resort_cluster::Coordinate;
/// let denver = Coordinate::new(39.7392, -104.9903);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check if the coordinate is a valid WGS84 position.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A ski resort record: stable identifier, location, and the payload fields
/// used for marker labels.
///
/// Resorts are immutable inputs owned by the catalog; the clustering engine
/// never mutates them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Resort {
    /// Unique identifier for the resort
    pub id: String,
    /// Display name
    pub name: String,
    /// Two-letter state code (e.g. "CO")
    pub state: String,
    /// Marketing region name (e.g. "Rocky Mountains")
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Resort {
    /// Create a new resort record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<String>,
        region: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: state.into(),
            region: region.into(),
            latitude,
            longitude,
        }
    }

    /// The resort's location as a [`Coordinate`].
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Check if the resort has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.coordinate().is_valid()
    }
}

/// The visible map region: a center coordinate plus an angular span in degrees.
///
/// Produced by the map surface on every pan/zoom gesture; transient, never
/// persisted.
///
/// # Example
/// ```
/// use resort_cluster::{Coordinate, GranularityLevel, Viewport};
///
/// let viewport = Viewport::new(Coordinate::new(39.5, -106.0), 5.0, 5.0);
/// assert_eq!(viewport.granularity(), GranularityLevel::Proximity);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Viewport {
    pub center: Coordinate,
    /// Latitude span in degrees
    pub lat_delta: f64,
    /// Longitude span in degrees
    pub lng_delta: f64,
}

impl Viewport {
    /// Create a viewport from a center and angular spans.
    pub fn new(center: Coordinate, lat_delta: f64, lng_delta: f64) -> Self {
        Self { center, lat_delta, lng_delta }
    }

    /// Create a square viewport around a center.
    pub fn around(center: Coordinate, span: f64) -> Self {
        Self::new(center, span, span)
    }

    /// Create a viewport framing all given resorts with a 1.5x margin.
    ///
    /// Returns `None` for an empty slice.
    ///
    /// # Example
    /// ```
    /// use resort_cluster::{Resort, Viewport};
    ///
    /// let resorts = vec![
    ///     Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550),
    ///     Resort::new("steamboat", "Steamboat Springs", "CO", "Rocky Mountains", 40.4850, -106.8317),
    /// ];
    ///
    /// let viewport = Viewport::fitting(&resorts).unwrap();
    /// assert!((viewport.center.latitude - 40.04555).abs() < 1e-6);
    /// ```
    pub fn fitting(resorts: &[Resort]) -> Option<Self> {
        let coords: Vec<Coordinate> = resorts.iter().map(|r| r.coordinate()).collect();
        let (min_lat, max_lat, min_lng, max_lng) = geo_utils::compute_bounds(&coords)?;

        let center = Coordinate::new((min_lat + max_lat) / 2.0, (min_lng + max_lng) / 2.0);
        Some(Self::new(
            center,
            (max_lat - min_lat) * 1.5,
            (max_lng - min_lng) * 1.5,
        ))
    }

    /// Map zoom level derived from the longitude span.
    ///
    /// Smaller spans mean a more zoomed-in map and a larger zoom level.
    pub fn zoom_level(&self) -> f64 {
        (360.0 / self.lng_delta).log2()
    }

    /// The [`GranularityLevel`] active for this viewport.
    pub fn granularity(&self) -> GranularityLevel {
        GranularityLevel::from_span(self.lng_delta)
    }

    /// Southwest and northeast corners as (min_lat, max_lat, min_lng, max_lng).
    pub fn corners(&self) -> (f64, f64, f64, f64) {
        (
            self.center.latitude - self.lat_delta / 2.0,
            self.center.latitude + self.lat_delta / 2.0,
            self.center.longitude - self.lng_delta / 2.0,
            self.center.longitude + self.lng_delta / 2.0,
        )
    }

    /// Check whether a coordinate falls inside the viewport.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        let (min_lat, max_lat, min_lng, max_lng) = self.corners();
        coordinate.latitude >= min_lat
            && coordinate.latitude <= max_lat
            && coordinate.longitude >= min_lng
            && coordinate.longitude <= max_lng
    }
}

/// The degree of marker aggregation applied at the current zoom.
///
/// Derived purely from the viewport's longitude span; stateless and
/// recomputed on every viewport change.
///
/// | Longitude span | Level |
/// |---|---|
/// | ≥ 50° | Regional |
/// | 10°–50° | State |
/// | 2°–10° | Proximity |
/// | < 2° | Individual |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum GranularityLevel {
    /// Four fixed US regions
    Regional,
    /// One cluster per state
    State,
    /// Distance-based greedy clusters
    Proximity,
    /// Every resort gets its own marker
    Individual,
}

impl GranularityLevel {
    /// Classify a longitude span in degrees.
    ///
    /// Total over all non-negative spans; no error cases.
    ///
    /// # Example
    /// ```
    /// use resort_cluster::GranularityLevel;
    ///
    /// assert_eq!(GranularityLevel::from_span(60.0), GranularityLevel::Regional);
    /// assert_eq!(GranularityLevel::from_span(25.0), GranularityLevel::State);
    /// assert_eq!(GranularityLevel::from_span(5.0), GranularityLevel::Proximity);
    /// assert_eq!(GranularityLevel::from_span(0.5), GranularityLevel::Individual);
    /// ```
    pub fn from_span(lng_delta: f64) -> Self {
        if lng_delta >= 50.0 {
            GranularityLevel::Regional
        } else if lng_delta >= 10.0 {
            GranularityLevel::State
        } else if lng_delta >= 2.0 {
            GranularityLevel::Proximity
        } else {
            GranularityLevel::Individual
        }
    }
}

// ============================================================================
// FFI Exports (only when feature enabled)
// ============================================================================

#[cfg(feature = "ffi")]
mod ffi {
    use super::*;
    use log::info;

    /// Build the annotation list for a viewport.
    #[uniffi::export]
    pub fn ffi_build_annotations(
        resorts: Vec<Resort>,
        viewport: Viewport,
        config: ClusterConfig,
    ) -> Vec<AnnotationItem> {
        init_logging();
        info!(
            "[ResortClusterRust] build_annotations: {} resorts, span {:.2}x{:.2}",
            resorts.len(),
            viewport.lat_delta,
            viewport.lng_delta
        );

        let start = std::time::Instant::now();
        let annotations = build_annotations(&resorts, &viewport, &config);
        let elapsed = start.elapsed();

        info!(
            "[ResortClusterRust] {} resorts -> {} annotations ({:?}) in {:?}",
            resorts.len(),
            annotations.len(),
            viewport.granularity(),
            elapsed
        );

        annotations
    }

    /// Classify a viewport into a granularity level.
    #[uniffi::export]
    pub fn ffi_granularity(viewport: Viewport) -> GranularityLevel {
        viewport.granularity()
    }

    /// Whether per-marker name labels should render at this viewport.
    #[uniffi::export]
    pub fn ffi_show_labels(viewport: Viewport) -> bool {
        show_labels(viewport.granularity())
    }

    /// The viewport to frame when a marker is tapped, if any.
    ///
    /// Individual resort markers return `None`; the app opens a detail view
    /// for those instead.
    #[uniffi::export]
    pub fn ffi_zoom_target(item: AnnotationItem) -> Option<Viewport> {
        item.zoom_target()
    }

    /// Get the default clustering configuration.
    #[uniffi::export]
    pub fn default_cluster_config() -> ClusterConfig {
        init_logging();
        ClusterConfig::default()
    }

    /// Precompute annotation lists for several viewports in one call.
    ///
    /// Used by the app to prefetch the annotation set for each zoom level so
    /// zoom transitions never wait on a clustering pass.
    #[uniffi::export]
    pub fn ffi_build_annotations_batch(
        resorts: Vec<Resort>,
        viewports: Vec<Viewport>,
        config: ClusterConfig,
    ) -> Vec<Vec<AnnotationItem>> {
        init_logging();
        info!(
            "[ResortClusterRust] batch precompute: {} resorts x {} viewports",
            resorts.len(),
            viewports.len()
        );

        let start = std::time::Instant::now();

        #[cfg(feature = "parallel")]
        let results = build_annotations_batch(&resorts, &viewports, &config);

        #[cfg(not(feature = "parallel"))]
        let results: Vec<Vec<AnnotationItem>> = viewports
            .iter()
            .map(|v| build_annotations(&resorts, v, &config))
            .collect();

        let elapsed = start.elapsed();
        info!(
            "[ResortClusterRust] batch precompute done: {} lists in {:?}",
            results.len(),
            elapsed
        );

        results
    }

    /// Fetch the resort catalog from the backend.
    #[cfg(feature = "http")]
    #[uniffi::export]
    pub fn ffi_fetch_catalog(base_url: String, api_key: Option<String>) -> CatalogResult {
        init_logging();
        info!("[ResortClusterRust] fetch_catalog from {}", base_url);
        crate::http::fetch_catalog_sync(base_url, api_key)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(39.7392, -104.9903).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_granularity_thresholds() {
        assert_eq!(GranularityLevel::from_span(120.0), GranularityLevel::Regional);
        assert_eq!(GranularityLevel::from_span(50.0), GranularityLevel::Regional);
        assert_eq!(GranularityLevel::from_span(49.9), GranularityLevel::State);
        assert_eq!(GranularityLevel::from_span(10.0), GranularityLevel::State);
        assert_eq!(GranularityLevel::from_span(9.9), GranularityLevel::Proximity);
        assert_eq!(GranularityLevel::from_span(2.0), GranularityLevel::Proximity);
        assert_eq!(GranularityLevel::from_span(1.9), GranularityLevel::Individual);
        assert_eq!(GranularityLevel::from_span(0.0), GranularityLevel::Individual);
    }

    #[test]
    fn test_zoom_level() {
        let viewport = Viewport::around(Coordinate::new(39.5, -106.0), 360.0);
        assert!((viewport.zoom_level() - 0.0).abs() < 1e-9);

        let zoomed = Viewport::around(Coordinate::new(39.5, -106.0), 360.0 / 64.0);
        assert!((zoomed.zoom_level() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_viewport_fitting() {
        let resorts = vec![
            Resort::new("a", "A", "CO", "Rocky Mountains", 39.0, -106.0),
            Resort::new("b", "B", "CO", "Rocky Mountains", 41.0, -104.0),
        ];

        let viewport = Viewport::fitting(&resorts).unwrap();
        assert!((viewport.center.latitude - 40.0).abs() < 1e-9);
        assert!((viewport.center.longitude - (-105.0)).abs() < 1e-9);
        assert!((viewport.lat_delta - 3.0).abs() < 1e-9);
        assert!((viewport.lng_delta - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_viewport_fitting_empty() {
        assert!(Viewport::fitting(&[]).is_none());
    }

    #[test]
    fn test_viewport_contains() {
        let viewport = Viewport::around(Coordinate::new(40.0, -105.0), 2.0);
        assert!(viewport.contains(&Coordinate::new(40.5, -104.5)));
        assert!(!viewport.contains(&Coordinate::new(42.0, -105.0)));
    }
}
