use crate::algorithm::hard::{run_hard, HardClustering};
use crate::config::ClusterConfig;
use crate::error::ClusterError;
use crate::observer::IterationObserver;
use crate::types::{Centroid, GeoPoint};

/// Hard-assignment (k-means) clusterer.
///
/// Each iteration assigns every point to its nearest centroid and then moves
/// each centroid to the mean of its points. The run stops on the first pass in
/// which no point changes cluster. The number of clusters is the number of
/// seeds passed to [`run`](Self::run).
///
/// # Example
///
/// ```
/// use geocluster_rs::{Centroid, GeoPoint, HardClusterer};
///
/// let points = vec![
///     GeoPoint::new("A", 0.0, 0.0),
///     GeoPoint::new("B", 0.0, 1.0),
///     GeoPoint::new("C", 10.0, 10.0),
///     GeoPoint::new("D", 10.0, 11.0),
/// ];
/// let seeds = vec![Centroid::new(0.0, 0.0), Centroid::new(10.0, 10.0)];
///
/// let result = HardClusterer::new().run(points, seeds).unwrap();
/// assert_eq!(result.labels, vec![0, 0, 1, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HardClusterer {
    config: ClusterConfig,
}

impl HardClusterer {
    /// Create a new HardClusterer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new HardClusterer with custom configuration.
    pub fn with_config(config: ClusterConfig) -> Self {
        Self { config }
    }

    /// Cluster `points` starting from the `seeds` centroids.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `seeds` or `points` is empty, or any coordinate is not finite
    /// - the configuration is invalid
    /// - points are still changing cluster after `max_iters` iterations
    pub fn run(
        &self,
        points: Vec<GeoPoint>,
        seeds: Vec<Centroid>,
    ) -> Result<HardClustering, ClusterError> {
        run_hard(points, seeds, &self.config, &mut ())
    }

    /// Like [`run`](Self::run), calling `observer` after every update step.
    ///
    /// An observer error aborts the run with [`ClusterError::Observer`].
    pub fn run_with_observer<O: IterationObserver>(
        &self,
        points: Vec<GeoPoint>,
        seeds: Vec<Centroid>,
        mut observer: O,
    ) -> Result<HardClustering, ClusterError> {
        run_hard(points, seeds, &self.config, &mut observer)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{HardSnapshot, ObserverError};

    fn points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new("A", 0.0, 0.0),
            GeoPoint::new("B", 0.0, 1.0),
            GeoPoint::new("C", 10.0, 10.0),
            GeoPoint::new("D", 10.0, 11.0),
        ]
    }

    #[test]
    fn test_hard_clusterer_new() {
        let clusterer = HardClusterer::new();
        assert_eq!(clusterer.config().max_iters, 300);
    }

    #[test]
    fn test_hard_clusterer_run() {
        let seeds = vec![Centroid::new(0.0, 0.0), Centroid::new(10.0, 10.0)];
        let result = HardClusterer::new().run(points(), seeds).unwrap();

        assert_eq!(result.k(), 2);
        assert_eq!(result.labels, vec![0, 0, 1, 1]);
        assert_eq!(result.points, points());
    }

    #[test]
    fn test_hard_clusterer_no_seeds() {
        let result = HardClusterer::new().run(points(), Vec::new());
        assert!(matches!(result, Err(ClusterError::InvalidK(_))));
    }

    #[test]
    fn test_hard_clusterer_observer_failure() {
        struct Failing;

        impl IterationObserver for Failing {
            fn on_hard_iteration(&mut self, _: &HardSnapshot<'_>) -> Result<(), ObserverError> {
                Err("display closed".into())
            }
        }

        let seeds = vec![Centroid::new(0.0, 0.0), Centroid::new(10.0, 10.0)];
        let result = HardClusterer::new().run_with_observer(points(), seeds, Failing);
        assert!(matches!(result, Err(ClusterError::Observer(_))));
    }
}
