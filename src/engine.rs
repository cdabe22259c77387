//! The published annotation list, recomputed per viewport change.
//!
//! `ClusterEngine` is the single writer of the annotation list: every
//! viewport change triggers a synchronous, bounded recomputation that
//! replaces the list wholesale. Rapid successive updates simply supersede
//! each other; there is nothing to cancel. Construct one engine per map
//! surface and hand it whatever catalog source the app uses - the engine
//! takes no global dependencies.

use log::{debug, info};

use crate::annotation::{show_labels, AnnotationItem};
use crate::cluster::{build_annotations, ClusterConfig};
use crate::{GranularityLevel, Resort, Viewport};

/// Recomputes and publishes the marker set for a map surface.
///
/// # Example
/// ```
/// use resort_cluster::{ClusterEngine, Coordinate, Resort, Viewport};
///
/// let resorts = vec![
///     Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550),
///     Resort::new("stowe", "Stowe", "VT", "Northeast", 44.5303, -72.7814),
/// ];
///
/// let mut engine = ClusterEngine::default();
/// engine.update(&resorts, &Viewport::around(Coordinate::new(40.0, -98.0), 60.0));
/// assert_eq!(engine.annotations().len(), 2); // two regional clusters
///
/// engine.update(&resorts, &Viewport::around(Coordinate::new(39.6, -106.3), 0.5));
/// assert_eq!(engine.annotations().len(), 2); // two individual markers
/// assert!(engine.labels_visible());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClusterEngine {
    config: ClusterConfig,
    annotations: Vec<AnnotationItem>,
    level: Option<GranularityLevel>,
}

impl ClusterEngine {
    /// Create an engine with a custom clustering configuration.
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config,
            annotations: Vec::new(),
            level: None,
        }
    }

    /// Recompute the annotation list for a new viewport.
    ///
    /// Replaces the previous list wholesale and returns the new one.
    pub fn update(&mut self, resorts: &[Resort], viewport: &Viewport) -> &[AnnotationItem] {
        let level = viewport.granularity();

        if self.level != Some(level) {
            info!(
                "granularity change: {:?} -> {:?} (span {:.2}°)",
                self.level, level, viewport.lng_delta
            );
        }

        self.annotations = build_annotations(resorts, viewport, &self.config);
        self.level = Some(level);

        debug!(
            "published {} annotations for {} resorts",
            self.annotations.len(),
            resorts.len()
        );

        &self.annotations
    }

    /// The currently published annotation list.
    pub fn annotations(&self) -> &[AnnotationItem] {
        &self.annotations
    }

    /// The granularity level of the last update, if any.
    pub fn level(&self) -> Option<GranularityLevel> {
        self.level
    }

    /// Whether per-marker name labels should render for the last update.
    pub fn labels_visible(&self) -> bool {
        self.level.map(show_labels).unwrap_or(false)
    }

    /// The active clustering configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;

    fn resorts() -> Vec<Resort> {
        vec![
            Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550),
            Resort::new("steamboat", "Steamboat Springs", "CO", "Rocky Mountains", 40.4850, -106.8317),
            Resort::new("stowe", "Stowe", "VT", "Northeast", 44.5303, -72.7814),
        ]
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let mut engine = ClusterEngine::default();
        let resorts = resorts();

        let wide = Viewport::around(Coordinate::new(40.0, -98.0), 60.0);
        engine.update(&resorts, &wide);
        assert_eq!(engine.level(), Some(GranularityLevel::Regional));
        assert_eq!(engine.annotations().len(), 2);

        let narrow = Viewport::around(Coordinate::new(39.6, -106.3), 1.0);
        engine.update(&resorts, &narrow);
        assert_eq!(engine.level(), Some(GranularityLevel::Individual));
        assert_eq!(engine.annotations().len(), 3);
        assert!(engine
            .annotations()
            .iter()
            .all(|a| matches!(a, AnnotationItem::Resort(_))));
    }

    #[test]
    fn test_labels_only_when_individual() {
        let mut engine = ClusterEngine::default();
        let resorts = resorts();

        assert!(!engine.labels_visible()); // nothing published yet

        engine.update(&resorts, &Viewport::around(Coordinate::new(40.0, -98.0), 20.0));
        assert!(!engine.labels_visible());

        engine.update(&resorts, &Viewport::around(Coordinate::new(39.6, -106.3), 0.5));
        assert!(engine.labels_visible());
    }

    #[test]
    fn test_empty_catalog() {
        let mut engine = ClusterEngine::default();
        let published = engine.update(&[], &Viewport::around(Coordinate::new(40.0, -98.0), 60.0));
        assert!(published.is_empty());
    }
}
