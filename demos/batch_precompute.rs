//! Precompute annotation lists for every zoom level in parallel.
//!
//! Run with: cargo run --example batch_precompute --features parallel

use resort_cluster::{build_annotations_batch, ClusterConfig, Coordinate, Resort, Viewport};
use std::time::Instant;

fn main() {
    // Synthesize a larger catalog spread over Colorado
    let resorts: Vec<Resort> = (0..500)
        .map(|i| {
            let lat = 37.0 + (i % 25) as f64 * 0.15;
            let lng = -109.0 + (i / 25) as f64 * 0.25;
            Resort::new(
                format!("resort-{:03}", i),
                format!("Resort {}", i),
                "CO",
                "Rocky Mountains",
                lat,
                lng,
            )
        })
        .collect();

    let config = ClusterConfig::default();
    let center = Coordinate::new(39.0, -106.5);
    let viewports: Vec<Viewport> = [60.0, 20.0, 8.0, 4.0, 1.0, 0.25]
        .into_iter()
        .map(|span| Viewport::around(center, span))
        .collect();

    let start = Instant::now();
    let results = build_annotations_batch(&resorts, &viewports, &config);
    let elapsed = start.elapsed();

    println!(
        "Precomputed {} annotation lists for {} resorts in {:?}\n",
        results.len(),
        resorts.len(),
        elapsed
    );

    for (viewport, annotations) in viewports.iter().zip(&results) {
        println!(
            "span {:6.2}° ({:?}): {} markers",
            viewport.lng_delta,
            viewport.granularity(),
            annotations.len()
        );
    }
}
