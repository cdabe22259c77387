//! Basic example of clustering a resort catalog at each zoom level.
//!
//! Run with: cargo run --example basic_clustering

use resort_cluster::{build_annotations, ClusterConfig, Coordinate, Resort, Viewport};

fn sample_catalog() -> Vec<Resort> {
    vec![
        Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550),
        Resort::new("breckenridge", "Breckenridge", "CO", "Rocky Mountains", 39.4817, -106.0384),
        Resort::new("keystone", "Keystone", "CO", "Rocky Mountains", 39.6084, -105.9437),
        Resort::new("steamboat", "Steamboat Springs", "CO", "Rocky Mountains", 40.4850, -106.8317),
        Resort::new("alta", "Alta", "UT", "Rocky Mountains", 40.5883, -111.6358),
        Resort::new("snowbird", "Snowbird", "UT", "Rocky Mountains", 40.5830, -111.6508),
        Resort::new("stowe", "Stowe", "VT", "Northeast", 44.5303, -72.7814),
        Resort::new("killington", "Killington", "VT", "Northeast", 43.6045, -72.8201),
        Resort::new("palisades", "Palisades Tahoe", "CA", "West Coast", 39.1969, -120.2358),
        Resort::new("sugar-mountain", "Sugar Mountain", "NC", "Southeast", 36.1317, -81.8795),
    ]
}

fn main() {
    let resorts = sample_catalog();
    let config = ClusterConfig::default();
    let center = Coordinate::new(39.8, -98.5); // continental US

    let levels = [
        ("Regional (span 60°)", 60.0),
        ("State (span 20°)", 20.0),
        ("Proximity (span 5°)", 5.0),
        ("Individual (span 0.5°)", 0.5),
    ];

    println!("Clustering {} resorts\n", resorts.len());

    for (label, span) in levels {
        let viewport = Viewport::around(center, span);
        let annotations = build_annotations(&resorts, &viewport, &config);

        println!("{} -> {} markers:", label, annotations.len());
        for item in &annotations {
            let coord = item.coordinate();
            println!(
                "   {:<28} ({:7.3}, {:9.3})  [{}]",
                item.title(),
                coord.latitude,
                coord.longitude,
                item.id()
            );
        }
        println!();
    }
}
