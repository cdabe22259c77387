//! Simulates a user zooming in by tapping cluster markers.
//!
//! Starts at a continent-wide viewport, taps the first cluster annotation at
//! each step, and re-frames the map with the cluster's zoom target until an
//! individual resort marker is reached.
//!
//! Run with: cargo run --example zoom_walkthrough

use resort_cluster::{AnnotationItem, ClusterEngine, Coordinate, Resort, Viewport};

fn main() {
    let resorts = vec![
        Resort::new("vail", "Vail", "CO", "Rocky Mountains", 39.6061, -106.3550),
        Resort::new("breckenridge", "Breckenridge", "CO", "Rocky Mountains", 39.4817, -106.0384),
        Resort::new("keystone", "Keystone", "CO", "Rocky Mountains", 39.6084, -105.9437),
        Resort::new("steamboat", "Steamboat Springs", "CO", "Rocky Mountains", 40.4850, -106.8317),
        Resort::new("stowe", "Stowe", "VT", "Northeast", 44.5303, -72.7814),
    ];

    let mut engine = ClusterEngine::default();
    let mut viewport = Viewport::around(Coordinate::new(39.8, -98.5), 60.0);

    for step in 1..=6 {
        let annotations = engine.update(&resorts, &viewport).to_vec();
        let level = engine.level().expect("level set after update");

        println!(
            "Step {}: span {:.2}° -> {:?}, {} markers (labels: {})",
            step,
            viewport.lng_delta,
            level,
            annotations.len(),
            engine.labels_visible()
        );
        for item in &annotations {
            println!("   {}", item.title());
        }

        // Tap the first cluster marker, if any
        let tapped = annotations
            .iter()
            .find(|item| !matches!(item, AnnotationItem::Resort(_)));

        match tapped.and_then(|item| item.zoom_target()) {
            Some(target) => {
                println!(
                    "   -> tap '{}', re-frame to span {:.2}°\n",
                    tapped.map(|t| t.title()).unwrap_or_default(),
                    target.lng_delta
                );
                viewport = target;
            }
            None => {
                println!("   -> only individual markers left; tapping opens the detail view");
                break;
            }
        }
    }
}
