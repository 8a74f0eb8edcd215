//! # geocluster-rs
//!
//! Hard (k-means) and soft (fuzzy c-means) clustering of latitude/longitude
//! points.
//!
//! ## Features
//!
//! - **Caller-supplied seeds**: the number of clusters and the initial centroid
//!   positions come from the caller; nothing inside a run is random
//! - **Converge on stable decisions**: a run stops on the first pass in which no
//!   point changes its hard label (k-means) or dominant cluster (fuzzy c-means)
//! - **Bounded**: a configurable iteration cap turns oscillating inputs into a
//!   [`ClusterError::NonConvergence`] error instead of an endless loop
//! - **Parallel assignment**: points are assigned with rayon against a frozen
//!   centroid snapshot, with results identical to a serial pass
//! - **Observable**: an [`IterationObserver`] receives the full state after every
//!   update step, e.g. for plotting
//!
//! Distances are planar Euclidean distances on the raw coordinates. No
//! geodesic correction is made.
//!
//! ## Example
//!
//! ```rust
//! use geocluster_rs::{Centroid, FuzzyClusterer, GeoPoint, HardClusterer};
//!
//! let points = vec![
//!     GeoPoint::new("A", 0.0, 0.0),
//!     GeoPoint::new("B", 0.0, 1.0),
//!     GeoPoint::new("C", 10.0, 10.0),
//!     GeoPoint::new("D", 10.0, 11.0),
//! ];
//! let seeds = vec![Centroid::new(0.0, 0.0), Centroid::new(10.0, 10.0)];
//!
//! let hard = HardClusterer::new()
//!     .run(points.clone(), seeds.clone())
//!     .unwrap();
//! assert_eq!(hard.labels, vec![0, 0, 1, 1]);
//! assert_eq!(hard.n_iterations, 1);
//!
//! let fuzzy = FuzzyClusterer::new().run(points, seeds).unwrap();
//! assert_eq!(fuzzy.dominant_labels, vec![0, 0, 1, 1]);
//! let row = fuzzy.membership(1);
//! assert!((row.sum() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use geocluster_rs::{Centroid, ClusterConfig, GeoPoint, HardClusterer};
//! use ndarray::array;
//!
//! let coords = array![[29.76, -95.37], [29.42, -98.49], [40.71, -74.01], [39.95, -75.17]];
//! let points = GeoPoint::from_rows(&coords.view()).unwrap();
//! let seeds = vec![Centroid::from(&points[0]), Centroid::from(&points[2])];
//!
//! let config = ClusterConfig {
//!     max_iters: 50,
//!     verbose: true,
//!     ..Default::default()
//! };
//!
//! let clustering = HardClusterer::with_config(config).run(points, seeds).unwrap();
//! assert_eq!(clustering.cluster_sizes(), vec![2, 2]);
//! ```

mod algorithm;
mod config;
mod convergence;
mod distance;
mod error;
mod fuzzy;
mod hard;
mod observer;
mod types;

pub use algorithm::fuzzy::{dominant_cluster, inverse_square_weight, memberships, FuzzyClustering};
pub use algorithm::hard::HardClustering;
pub use config::{ClusterConfig, ZERO_DISTANCE_WEIGHT};
pub use convergence::ConvergenceDetector;
pub use distance::{
    assign_labels, compute_centroid_shift, euclidean_distance, nearest_centroid,
    squared_distance, sum_of_squared_errors,
};
pub use error::{ClusterError, DegenerateCluster};
pub use fuzzy::FuzzyClusterer;
pub use hard::HardClusterer;
pub use observer::{FuzzySnapshot, HardSnapshot, IterationObserver, ObserverError};
pub use types::{Centroid, Coordinates, GeoPoint, MAX_COORDINATE_MAGNITUDE};
