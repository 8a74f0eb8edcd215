use super::{run_to_convergence, validate_inputs, ClusterLoop};
use crate::config::ClusterConfig;
use crate::convergence::ConvergenceDetector;
use crate::distance::euclidean_distance;
use crate::error::ClusterError;
use crate::observer::{FuzzySnapshot, IterationObserver, ObserverError};
use crate::types::{centroids_to_array, Centroid, Coordinates, GeoPoint};
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1, Axis};
use rayon::prelude::*;

/// Membership value of a point that has not been weighted yet
pub(crate) const UNASSIGNED_MEMBERSHIP: f64 = -1.0;

/// Result of a converged fuzzy c-means clustering run
#[derive(Debug, Clone)]
pub struct FuzzyClustering {
    /// Input points, in the order they were given
    pub points: Vec<GeoPoint>,
    /// Final centroid positions
    pub centroids: Vec<Centroid>,
    /// Membership matrix of shape (n_points, k); each row sums to 1
    pub memberships: Array2<f64>,
    /// Cluster with the highest membership for each point
    pub dominant_labels: Vec<usize>,
    /// Membership value of the dominant cluster for each point
    pub dominant_weights: Vec<f64>,
    /// Number of weight/update iterations performed
    pub n_iterations: usize,
    zero_distance_weight: f64,
}

impl FuzzyClustering {
    /// Number of clusters
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Membership vector of the point at `index`
    pub fn membership(&self, index: usize) -> ArrayView1<'_, f64> {
        self.memberships.row(index)
    }

    /// Memberships of new points against the final centroids
    pub fn predict_memberships<P: Coordinates + Sync>(&self, points: &[P]) -> Array2<f64> {
        let mut out = Array2::zeros((points.len(), self.k()));
        fill_membership_rows(points, &self.centroids, self.zero_distance_weight, &mut out);
        out
    }

    /// Number of points whose dominant cluster is each centroid
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        for &label in &self.dominant_labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Final centroids as a `(k, 2)` array of `[lat, lng]` rows
    pub fn centroids_array(&self) -> Array2<f64> {
        centroids_to_array(&self.centroids)
    }
}

/// Fuzzy weight of a point for one centroid: `1 / distance^2`.
///
/// A point on top of the centroid (or close enough that `1 / distance^2`
/// overflows) gets `zero_distance_weight` instead of an infinite weight.
/// A NaN distance yields a NaN weight.
#[inline]
pub fn inverse_square_weight(distance: f64, zero_distance_weight: f64) -> f64 {
    let weight = 1.0 / (distance * distance);
    if weight.is_infinite() {
        zero_distance_weight
    } else {
        weight
    }
}

/// Normalised membership of a point in every centroid (fuzziness 2)
pub fn memberships<P>(point: &P, centroids: &[Centroid], zero_distance_weight: f64) -> Vec<f64>
where
    P: Coordinates + ?Sized,
{
    let mut row = Array1::zeros(centroids.len());
    write_memberships(point, centroids, zero_distance_weight, row.view_mut());
    row.to_vec()
}

fn write_memberships<P>(
    point: &P,
    centroids: &[Centroid],
    zero_distance_weight: f64,
    mut row: ArrayViewMut1<'_, f64>,
) where
    P: Coordinates + ?Sized,
{
    for (m, c) in row.iter_mut().zip(centroids) {
        *m = inverse_square_weight(euclidean_distance(point, c), zero_distance_weight);
    }
    let total = row.sum();
    row.mapv_inplace(|m| m / total);
}

/// Write each point's memberships into its row of `out`
fn fill_membership_rows<P: Coordinates + Sync>(
    points: &[P],
    centroids: &[Centroid],
    zero_distance_weight: f64,
    out: &mut Array2<f64>,
) {
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(points.par_iter())
        .for_each(|(row, p)| write_memberships(p, centroids, zero_distance_weight, row));
}

/// Index and value of the largest membership; the first maximum wins ties
pub fn dominant_cluster<'a>(membership: impl IntoIterator<Item = &'a f64>) -> (usize, f64) {
    let mut label = 0;
    let mut max = UNASSIGNED_MEMBERSHIP;

    for (j, &m) in membership.into_iter().enumerate() {
        if m > max {
            max = m;
            label = j;
        }
    }

    (label, max)
}

/// Working state of the fuzzy c-means loop
struct FuzzyState {
    points: Vec<GeoPoint>,
    centroids: Vec<Centroid>,
    memberships: Array2<f64>,
    dominant_labels: Vec<usize>,
    dominant_weights: Vec<f64>,
    detector: ConvergenceDetector,
    zero_distance_weight: f64,
}

impl ClusterLoop for FuzzyState {
    const NAME: &'static str = "fuzzy c-means";

    fn assign(&mut self) -> usize {
        fill_membership_rows(
            &self.points,
            &self.centroids,
            self.zero_distance_weight,
            &mut self.memberships,
        );

        for (i, row) in self.memberships.outer_iter().enumerate() {
            let (label, weight) = dominant_cluster(&row);
            self.dominant_labels[i] = label;
            self.dominant_weights[i] = weight;
        }

        self.detector.observe(&self.dominant_labels)
    }

    fn update(&mut self, _iteration: usize) {
        for (j, centroid) in self.centroids.iter_mut().enumerate() {
            let column = self.memberships.column(j);
            let total_weight = column.sum();
            if total_weight.is_nan() || total_weight <= 0.0 {
                continue;
            }

            let (lat, lng) = column.iter().zip(&self.points).fold(
                (0.0, 0.0),
                |(lat, lng), (&m, p)| {
                    let share = m / total_weight;
                    (lat + share * p.lat, lng + share * p.lng)
                },
            );
            centroid.lat = lat;
            centroid.lng = lng;
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
        observer.on_fuzzy_iteration(&FuzzySnapshot {
            iteration,
            centroids: &self.centroids,
            points: &self.points,
            memberships: self.memberships.view(),
            dominant_labels: &self.dominant_labels,
            dominant_weights: &self.dominant_weights,
            changed,
        })
    }
}

/// Run fuzzy c-means from the given seeds until no dominant label changes
pub(crate) fn run_fuzzy(
    points: Vec<GeoPoint>,
    seeds: Vec<Centroid>,
    config: &ClusterConfig,
    observer: &mut dyn IterationObserver,
) -> Result<FuzzyClustering, ClusterError> {
    validate_inputs(&points, &seeds, config)?;

    let n = points.len();
    let k = seeds.len();
    log::info!("Running fuzzy c-means: {} points, {} clusters", n, k);

    let mut state = FuzzyState {
        points,
        centroids: seeds,
        memberships: Array2::from_elem((n, k), UNASSIGNED_MEMBERSHIP),
        dominant_labels: vec![0; n],
        dominant_weights: vec![UNASSIGNED_MEMBERSHIP; n],
        detector: ConvergenceDetector::new(n),
        zero_distance_weight: config.zero_distance_weight,
    };

    let n_iterations = run_to_convergence(&mut state, config, observer)?;

    Ok(FuzzyClustering {
        points: state.points,
        centroids: state.centroids,
        memberships: state.memberships,
        dominant_labels: state.dominant_labels,
        dominant_weights: state.dominant_weights,
        n_iterations,
        zero_distance_weight: state.zero_distance_weight,
    })
}
