//! # Geographic Utilities
//!
//! Core geographic computation shared by the clustering passes and the
//! spatial index.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two coordinates |
//! | [`compute_center`] | Arithmetic-mean centroid of a coordinate set |
//! | [`compute_bounds`] | Bounding box of a coordinate set |
//! | [`meters_to_degrees`] | Convert meters to approximate degrees at a latitude |
//!
//! All functions expect WGS84 coordinates (latitude/longitude in degrees),
//! the standard used by GPS receivers and mapping services.

use crate::Coordinate;
use geo::{Distance, Haversine, Point};

/// Calculate the great-circle distance between two coordinates using the
/// Haversine formula.
///
/// Returns the distance in meters along the Earth's surface (assuming a
/// spherical Earth with radius 6,371 km). Accurate to within 0.3% for most
/// practical purposes.
///
/// # Example
///
/// ```rust
/// use resort_cluster::{geo_utils, Coordinate};
///
/// let vail = Coordinate::new(39.6061, -106.3550);
/// let breck = Coordinate::new(39.4817, -106.0384);
///
/// let distance = geo_utils::haversine_distance(&vail, &breck);
/// assert!((distance - 30_600.0).abs() < 2000.0); // ~30 km
/// ```
#[inline]
pub fn haversine_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let point_a = Point::new(a.longitude, a.latitude);
    let point_b = Point::new(b.longitude, b.latitude);
    Haversine::distance(point_a, point_b)
}

/// Compute the geographic center (centroid) of a coordinate set.
///
/// Returns the arithmetic mean of all latitude and longitude values, which
/// is how every cluster marker in this crate is placed. Suitable for the
/// small geographic areas clusters cover; sets crossing the antimeridian
/// would need a spherical centroid instead.
///
/// Returns (0, 0) for empty input; cluster constructors never pass one.
pub fn compute_center(coordinates: &[Coordinate]) -> Coordinate {
    if coordinates.is_empty() {
        return Coordinate::new(0.0, 0.0);
    }

    let sum_lat: f64 = coordinates.iter().map(|c| c.latitude).sum();
    let sum_lng: f64 = coordinates.iter().map(|c| c.longitude).sum();
    let n = coordinates.len() as f64;

    Coordinate::new(sum_lat / n, sum_lng / n)
}

/// Compute the bounding box of a coordinate set as
/// (min_lat, max_lat, min_lng, max_lng).
///
/// Returns `None` for empty input.
pub fn compute_bounds(coordinates: &[Coordinate]) -> Option<(f64, f64, f64, f64)> {
    if coordinates.is_empty() {
        return None;
    }

    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;

    for c in coordinates {
        min_lat = min_lat.min(c.latitude);
        max_lat = max_lat.max(c.latitude);
        min_lng = min_lng.min(c.longitude);
        max_lng = max_lng.max(c.longitude);
    }

    Some((min_lat, max_lat, min_lng, max_lng))
}

/// Convert meters to approximate degrees at a given latitude.
///
/// At the equator, 1 degree is about 111,320 meters; the longitude value
/// shrinks with cos(latitude). Returns a single value suitable for bounding
/// box expansion where a square search area is acceptable.
#[inline]
pub fn meters_to_degrees(meters: f64, latitude: f64) -> f64 {
    let lat_rad = latitude.to_radians();
    let meters_per_degree = 111_320.0 * lat_rad.cos().max(0.1);
    meters / meters_per_degree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_haversine_distance_same_point() {
        let p = Coordinate::new(39.6061, -106.3550);
        assert_eq!(haversine_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_haversine_distance_known_value() {
        // Denver to Salt Lake City is approximately 598 km
        let denver = Coordinate::new(39.7392, -104.9903);
        let slc = Coordinate::new(40.7608, -111.8910);
        let dist = haversine_distance(&denver, &slc);
        assert!(approx_eq(dist, 598_000.0, 10_000.0));
    }

    #[test]
    fn test_compute_center() {
        let coords = vec![
            Coordinate::new(39.50, -106.10),
            Coordinate::new(39.52, -106.12),
        ];
        let center = compute_center(&coords);
        assert!(approx_eq(center.latitude, 39.51, 0.001));
        assert!(approx_eq(center.longitude, -106.11, 0.001));
    }

    #[test]
    fn test_compute_center_empty() {
        let center = compute_center(&[]);
        assert_eq!(center.latitude, 0.0);
        assert_eq!(center.longitude, 0.0);
    }

    #[test]
    fn test_compute_bounds() {
        let coords = vec![
            Coordinate::new(39.50, -106.13),
            Coordinate::new(39.51, -106.12),
            Coordinate::new(39.505, -106.125),
        ];
        let (min_lat, max_lat, min_lng, max_lng) = compute_bounds(&coords).unwrap();
        assert_eq!(min_lat, 39.50);
        assert_eq!(max_lat, 39.51);
        assert_eq!(min_lng, -106.13);
        assert_eq!(max_lng, -106.12);
    }

    #[test]
    fn test_compute_bounds_empty() {
        assert!(compute_bounds(&[]).is_none());
    }

    #[test]
    fn test_meters_to_degrees() {
        // At the equator, 111km = 1 degree
        let deg = meters_to_degrees(111_320.0, 0.0);
        assert!(approx_eq(deg, 1.0, 0.01));

        // At higher latitude, same distance = more degrees
        let deg_40 = meters_to_degrees(111_320.0, 40.0);
        assert!(deg_40 > 1.0);
    }
}
