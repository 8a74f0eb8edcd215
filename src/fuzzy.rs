use crate::algorithm::fuzzy::{run_fuzzy, FuzzyClustering};
use crate::config::ClusterConfig;
use crate::error::ClusterError;
use crate::observer::IterationObserver;
use crate::types::{Centroid, GeoPoint};

/// Soft-assignment (fuzzy c-means) clusterer with fuzziness exponent 2.
///
/// Each point receives a membership in every cluster proportional to
/// `1 / distance^2`, normalised to sum to 1. Centroids move to the
/// membership-weighted mean of all points. The run stops on the first pass in
/// which no point's dominant (highest-membership) cluster changes; the
/// memberships themselves may still be moving at that point.
#[derive(Debug, Clone, Default)]
pub struct FuzzyClusterer {
    config: ClusterConfig,
}

impl FuzzyClusterer {
    /// Create a new FuzzyClusterer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new FuzzyClusterer with custom configuration.
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
    /// - dominant labels are still changing after `max_iters` iterations
    pub fn run(
        &self,
        points: Vec<GeoPoint>,
        seeds: Vec<Centroid>,
    ) -> Result<FuzzyClustering, ClusterError> {
        run_fuzzy(points, seeds, &self.config, &mut ())
    }

    /// Like [`run`](Self::run), calling `observer` after every update step.
    pub fn run_with_observer<O: IterationObserver>(
        &self,
        points: Vec<GeoPoint>,
        seeds: Vec<Centroid>,
        mut observer: O,
    ) -> Result<FuzzyClustering, ClusterError> {
        run_fuzzy(points, seeds, &self.config, &mut observer)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fuzzy_clusterer_run() {
        let points = vec![
            GeoPoint::new("A", 0.0, 0.0),
            GeoPoint::new("B", 0.0, 1.0),
            GeoPoint::new("C", 10.0, 10.0),
            GeoPoint::new("D", 10.0, 11.0),
        ];
        let seeds = vec![Centroid::new(0.0, 0.0), Centroid::new(10.0, 10.0)];

        let result = FuzzyClusterer::new().run(points, seeds).unwrap();

        assert_eq!(result.dominant_labels, vec![0, 0, 1, 1]);
        assert_eq!(result.memberships.shape(), &[4, 2]);
        for row in result.memberships.rows() {
            assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-9);
        }
        assert!(result.dominant_weights.iter().all(|&w| w > 0.9));
    }

    #[test]
    fn test_fuzzy_clusterer_empty_points() {
        let result = FuzzyClusterer::new().run(Vec::new(), vec![Centroid::new(0.0, 0.0)]);
        assert!(matches!(result, Err(ClusterError::InvalidInput(_))));
    }

    #[test]
    fn test_fuzzy_clusterer_custom_sentinel() {
        let config = ClusterConfig::new().with_zero_distance_weight(1e9);
        let clusterer = FuzzyClusterer::with_config(config);
        assert_eq!(clusterer.config().zero_distance_weight, 1e9);

        let points = vec![GeoPoint::new("A", 0.0, 0.0), GeoPoint::new("B", 5.0, 0.0)];
        let seeds = vec![Centroid::new(0.0, 0.0), Centroid::new(5.0, 0.0)];
        let result = clusterer.run(points, seeds).unwrap();

        assert!(result.membership(0)[0] > 0.999_999);
    }
}
