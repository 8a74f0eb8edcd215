//! Basic example demonstrating geocluster-rs usage
//!
//! Run with: cargo run --example basic --release

use geocluster_rs::{
    Centroid, ClusterConfig, FuzzyClusterer, GeoPoint, HardClusterer, HardSnapshot,
    IterationObserver, ObserverError,
};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

/// Prints a one-line summary after every k-means update step
struct ProgressPrinter;

impl IterationObserver for ProgressPrinter {
    fn on_hard_iteration(&mut self, snapshot: &HardSnapshot<'_>) -> Result<(), ObserverError> {
        println!(
            "  Iteration {}: {} points moved, objective = {:.4}",
            snapshot.iteration,
            snapshot.changed,
            snapshot.objective()
        );
        Ok(())
    }
}

fn main() {
    println!("=== geocluster-rs example ===\n");

    // Cities scattered around three metro areas
    let centers = [
        ("New York", 40.71, -74.01),
        ("Houston", 29.76, -95.37),
        ("Los Angeles", 34.05, -118.24),
    ];
    let per_center = 100;

    let mut points = Vec::with_capacity(centers.len() * per_center);
    for (name, lat, lng) in centers.iter() {
        let noise = Array2::random((per_center, 2), Uniform::new(-1.5f64, 1.5));
        for (i, row) in noise.outer_iter().enumerate() {
            points.push(GeoPoint::new(
                format!("{} #{}", name, i),
                lat + row[0],
                lng + row[1],
            ));
        }
    }

    println!("True cluster centers:");
    for (name, lat, lng) in centers.iter() {
        println!("  {}: ({:.2}, {:.2})", name, lat, lng);
    }
    println!();

    // Seed with the first point of each metro area
    let seeds: Vec<Centroid> = (0..centers.len())
        .map(|c| Centroid::from(&points[c * per_center]))
        .collect();

    let config = ClusterConfig::new().with_max_iters(100);

    println!("Running k-means with k={}...", seeds.len());
    let hard = HardClusterer::with_config(config.clone())
        .run_with_observer(points.clone(), seeds.clone(), ProgressPrinter)
        .expect("k-means failed");

    println!("\nConverged after {} iterations", hard.n_iterations);
    for (i, (centroid, size)) in hard.centroids.iter().zip(hard.cluster_sizes()).enumerate() {
        println!(
            "  Centroid {}: ({:.4}, {:.4}) with {} points",
            i, centroid.lat, centroid.lng, size
        );
    }
    println!();

    println!("Running fuzzy c-means with k={}...", seeds.len());
    let fuzzy = FuzzyClusterer::with_config(config)
        .run(points, seeds)
        .expect("fuzzy c-means failed");

    println!("Converged after {} iterations", fuzzy.n_iterations);
    for (i, centroid) in fuzzy.centroids.iter().enumerate() {
        println!("  Centroid {}: ({:.4}, {:.4})", i, centroid.lat, centroid.lng);
    }
    println!();

    println!("First 5 fuzzy assignments:");
    for i in 0..5 {
        println!(
            "  {} -> cluster {} ({:.1}%)",
            fuzzy.points[i].id,
            fuzzy.dominant_labels[i],
            fuzzy.dominant_weights[i] * 100.0
        );
    }

    println!("\n=== Done! ===");
}
