use super::{run_to_convergence, validate_inputs, ClusterLoop};
use crate::config::ClusterConfig;
use crate::convergence::ConvergenceDetector;
use crate::distance::{assign_labels, sum_of_squared_errors};
use crate::error::{ClusterError, DegenerateCluster};
use crate::observer::{HardSnapshot, IterationObserver, ObserverError};
use crate::types::{centroids_to_array, Centroid, Coordinates, GeoPoint};
use ndarray::Array2;

/// Result of a converged hard (k-means) clustering run
#[derive(Debug, Clone)]
pub struct HardClustering {
    /// Input points, in the order they were given
    pub points: Vec<GeoPoint>,
    /// Final centroid positions
    pub centroids: Vec<Centroid>,
    /// Index of the nearest centroid for each point
    pub labels: Vec<usize>,
    /// Number of assign/update iterations performed
    pub n_iterations: usize,
    /// Every time a centroid was left without points during the run
    pub degenerate_clusters: Vec<DegenerateCluster>,
}

impl HardClustering {
    /// Number of clusters
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Assign points to the nearest final centroid
    pub fn predict<P: Coordinates + Sync>(&self, points: &[P]) -> Vec<usize> {
        assign_labels(points, &self.centroids)
    }

    /// Sum of squared distances from each point to its assigned centroid
    pub fn objective(&self) -> f64 {
        sum_of_squared_errors(&self.points, &self.labels, &self.centroids)
    }

    /// Number of points assigned to each centroid
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Label of the first point with the given id
    pub fn label_of(&self, id: &str) -> Option<usize> {
        self.points
            .iter()
            .position(|p| p.id == id)
            .map(|i| self.labels[i])
    }

    /// Final centroids as a `(k, 2)` array of `[lat, lng]` rows
    pub fn centroids_array(&self) -> Array2<f64> {
        centroids_to_array(&self.centroids)
    }
}

/// Working state of the k-means loop
struct HardState {
    points: Vec<GeoPoint>,
    centroids: Vec<Centroid>,
    labels: Vec<usize>,
    detector: ConvergenceDetector,
    degenerate: Vec<DegenerateCluster>,
    /// Start of the current iteration's entries in `degenerate`
    degenerate_start: usize,
}

impl ClusterLoop for HardState {
    const NAME: &'static str = "k-means";

    fn assign(&mut self) -> usize {
        self.labels = assign_labels(&self.points, &self.centroids);
        self.detector.observe(&self.labels)
    }

    fn update(&mut self, iteration: usize) {
        let k = self.centroids.len();

        // Accumulators for new centroids
        let mut sums = vec![(0.0f64, 0.0f64); k];
        let mut counts = vec![0usize; k];

        for (point, &label) in self.points.iter().zip(&self.labels) {
            sums[label].0 += point.lat;
            sums[label].1 += point.lng;
            counts[label] += 1;
        }

        self.degenerate_start = self.degenerate.len();

        for (cluster_idx, centroid) in self.centroids.iter_mut().enumerate() {
            let count = counts[cluster_idx];
            if count > 0 {
                let (lat_sum, lng_sum) = sums[cluster_idx];
                centroid.lat = lat_sum / count as f64;
                centroid.lng = lng_sum / count as f64;
            } else {
                // Empty cluster keeps its previous position
                let event = DegenerateCluster {
                    iteration,
                    centroid: cluster_idx,
                };
                log::warn!("{}", event);
                self.degenerate.push(event);
            }
        }
    }

    fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    fn notify(
        &self,
        iteration: usize,
        changed: usize,
        observer: &mut dyn IterationObserver,
    ) -> Result<(), ObserverError> {
        observer.on_hard_iteration(&HardSnapshot {
            iteration,
            centroids: &self.centroids,
            points: &self.points,
            labels: &self.labels,
            changed,
            degenerate: &self.degenerate[self.degenerate_start..],
        })
    }
}

/// Run k-means from the given seeds until no point changes cluster
pub(crate) fn run_hard(
    points: Vec<GeoPoint>,
    seeds: Vec<Centroid>,
    config: &ClusterConfig,
    observer: &mut dyn IterationObserver,
) -> Result<HardClustering, ClusterError> {
    validate_inputs(&points, &seeds, config)?;

    log::info!(
        "Running k-means: {} points, {} clusters",
        points.len(),
        seeds.len()
    );

    let mut state = HardState {
        detector: ConvergenceDetector::new(points.len()),
        labels: Vec::with_capacity(points.len()),
        points,
        centroids: seeds,
        degenerate: Vec::new(),
        degenerate_start: 0,
    };

    let n_iterations = run_to_convergence(&mut state, config, observer)?;

    Ok(HardClustering {
        points: state.points,
        centroids: state.centroids,
        labels: state.labels,
        n_iterations,
        degenerate_clusters: state.degenerate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn four_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new("A", 0.0, 0.0),
            GeoPoint::new("B", 0.0, 1.0),
            GeoPoint::new("C", 10.0, 10.0),
            GeoPoint::new("D", 10.0, 11.0),
        ]
    }

    #[test]
    fn test_update_means() {
        let mut state = HardState {
            points: four_points(),
            centroids: vec![Centroid::new(0.0, 0.0), Centroid::new(10.0, 10.0)],
            labels: Vec::new(),
            detector: ConvergenceDetector::new(4),
            degenerate: Vec::new(),
            degenerate_start: 0,
        };

        assert_eq!(state.assign(), 4);
        assert_eq!(state.labels, vec![0, 0, 1, 1]);

        state.update(1);
        assert_relative_eq!(state.centroids[0].lat, 0.0);
        assert_relative_eq!(state.centroids[0].lng, 0.5);
        assert_relative_eq!(state.centroids[1].lat, 10.0);
        assert_relative_eq!(state.centroids[1].lng, 10.5);
        assert!(state.degenerate.is_empty());

        assert_eq!(state.assign(), 0);
    }

    #[test]
    fn test_empty_cluster_keeps_position() {
        let far = Centroid::new(500.0, 500.0);
        let mut state = HardState {
            points: four_points(),
            centroids: vec![Centroid::new(0.0, 0.0), far],
            labels: Vec::new(),
            detector: ConvergenceDetector::new(4),
            degenerate: Vec::new(),
            degenerate_start: 0,
        };

        state.assign();
        state.update(1);

        assert_eq!(state.centroids[1], far);
        assert!(state.centroids.iter().all(|c| c.lat.is_finite()));
        assert_eq!(
            state.degenerate,
            vec![DegenerateCluster {
                iteration: 1,
                centroid: 1
            }]
        );
    }

    #[test]
    fn test_run_hard_scenario() {
        let seeds = vec![Centroid::new(0.0, 0.0), Centroid::new(10.0, 10.0)];
        let result = run_hard(four_points(), seeds, &ClusterConfig::default(), &mut ()).unwrap();

        assert_eq!(result.n_iterations, 1);
        assert_eq!(result.labels, vec![0, 0, 1, 1]);
        assert_eq!(result.cluster_sizes(), vec![2, 2]);
        assert_eq!(result.label_of("D"), Some(1));
        assert_eq!(result.label_of("missing"), None);
        assert_relative_eq!(result.objective(), 1.0, epsilon = 1e-12);

        let array = result.centroids_array();
        assert_eq!(array.shape(), &[2, 2]);
        assert_relative_eq!(array[[1, 1]], 10.5);
    }
}
