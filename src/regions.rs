//! Static geography tables for regional clustering.
//!
//! The four US ski regions are fixed, hand-assigned groupings: each region
//! has a static state membership list, a hand-picked center coordinate for
//! marker placement, and a viewport span used when the region marker is
//! tapped. None of these are derived from the resort catalog.

use crate::{Coordinate, Viewport};

/// One of the four fixed US ski regions.
///
/// # Example
/// ```
/// use resort_cluster::SkiRegion;
///
/// assert_eq!(SkiRegion::from_state("CO"), Some(SkiRegion::RockyMountains));
/// assert_eq!(SkiRegion::from_state("VT"), Some(SkiRegion::Northeast));
/// assert_eq!(SkiRegion::from_state("NC"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum SkiRegion {
    Northeast,
    Central,
    RockyMountains,
    WestCoast,
}

impl SkiRegion {
    /// All regions, in display order.
    pub const ALL: [SkiRegion; 4] = [
        SkiRegion::Northeast,
        SkiRegion::Central,
        SkiRegion::RockyMountains,
        SkiRegion::WestCoast,
    ];

    /// Display name used in marker titles.
    pub fn name(&self) -> &'static str {
        match self {
            SkiRegion::Northeast => "Northeast",
            SkiRegion::Central => "Central",
            SkiRegion::RockyMountains => "Rocky Mountains",
            SkiRegion::WestCoast => "West Coast",
        }
    }

    /// Stable identifier fragment.
    pub fn slug(&self) -> &'static str {
        match self {
            SkiRegion::Northeast => "northeast",
            SkiRegion::Central => "central",
            SkiRegion::RockyMountains => "rocky-mountains",
            SkiRegion::WestCoast => "west-coast",
        }
    }

    /// State codes belonging to this region.
    pub fn states(&self) -> &'static [&'static str] {
        match self {
            SkiRegion::Northeast => &["VT", "NH", "ME", "NY", "PA", "MA", "CT"],
            SkiRegion::Central => &["MI", "WI", "MN", "IA", "IL"],
            SkiRegion::RockyMountains => &["CO", "UT", "WY", "MT", "ID", "NM"],
            SkiRegion::WestCoast => &["CA", "OR", "WA", "NV"],
        }
    }

    /// Hand-assigned marker coordinate for the region.
    ///
    /// Regional cluster markers sit at this fixed point, not at the centroid
    /// of their members.
    pub fn center(&self) -> Coordinate {
        match self {
            SkiRegion::Northeast => Coordinate::new(44.0, -72.0),
            SkiRegion::Central => Coordinate::new(45.0, -88.0),
            SkiRegion::RockyMountains => Coordinate::new(39.5, -106.0),
            SkiRegion::WestCoast => Coordinate::new(40.0, -120.0),
        }
    }

    /// Angular span as (lat_delta, lng_delta) framing the whole region.
    pub fn span(&self) -> (f64, f64) {
        match self {
            SkiRegion::Northeast => (8.0, 10.0),
            SkiRegion::Central => (8.0, 12.0),
            SkiRegion::RockyMountains => (12.0, 15.0),
            SkiRegion::WestCoast => (10.0, 12.0),
        }
    }

    /// The viewport framed when this region's marker is tapped.
    pub fn viewport(&self) -> Viewport {
        let (lat_delta, lng_delta) = self.span();
        Viewport::new(self.center(), lat_delta, lng_delta)
    }

    /// Look up the region for a state code, if the state is in any table.
    pub fn from_state(state: &str) -> Option<SkiRegion> {
        SkiRegion::ALL
            .into_iter()
            .find(|region| region.states().contains(&state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_lookup() {
        assert_eq!(SkiRegion::from_state("CO"), Some(SkiRegion::RockyMountains));
        assert_eq!(SkiRegion::from_state("UT"), Some(SkiRegion::RockyMountains));
        assert_eq!(SkiRegion::from_state("VT"), Some(SkiRegion::Northeast));
        assert_eq!(SkiRegion::from_state("CA"), Some(SkiRegion::WestCoast));
        assert_eq!(SkiRegion::from_state("WI"), Some(SkiRegion::Central));
        // Southeast states are in no region table
        assert_eq!(SkiRegion::from_state("NC"), None);
        assert_eq!(SkiRegion::from_state(""), None);
    }

    #[test]
    fn test_no_state_in_two_regions() {
        let mut seen = std::collections::HashSet::new();
        for region in SkiRegion::ALL {
            for state in region.states() {
                assert!(seen.insert(*state), "{} appears in two regions", state);
            }
        }
    }

    #[test]
    fn test_region_viewport_spans() {
        let viewport = SkiRegion::RockyMountains.viewport();
        assert_eq!(viewport.center, Coordinate::new(39.5, -106.0));
        assert_eq!(viewport.lat_delta, 12.0);
        assert_eq!(viewport.lng_delta, 15.0);
    }
}
