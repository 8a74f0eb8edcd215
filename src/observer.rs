//! Per-iteration snapshot hook.
//!
//! Both engines call their observer once after every update step with a
//! read-only view of the current centroids and point state. Observers are
//! meant for visualisation and diagnostics; returning an error aborts the run
//! with [`ClusterError::Observer`](crate::ClusterError::Observer).

use crate::distance::sum_of_squared_errors;
use crate::error::DegenerateCluster;
use crate::types::{Centroid, GeoPoint};
use ndarray::{ArrayView1, ArrayView2, Axis};

/// Error type returned by observers
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Hard clustering state after an update step
#[derive(Debug, Clone, Copy)]
pub struct HardSnapshot<'a> {
    /// Update step number, starting at 1
    pub iteration: usize,
    pub centroids: &'a [Centroid],
    pub points: &'a [GeoPoint],
    pub labels: &'a [usize],
    /// Points that changed label in the assign step of this iteration
    pub changed: usize,
    /// Centroids left without points in this iteration's update step
    pub degenerate: &'a [DegenerateCluster],
}

impl HardSnapshot<'_> {
    /// Sum of squared distances from each point to its assigned centroid
    pub fn objective(&self) -> f64 {
        sum_of_squared_errors(self.points, self.labels, self.centroids)
    }
}

/// Fuzzy clustering state after an update step
#[derive(Debug, Clone, Copy)]
pub struct FuzzySnapshot<'a> {
    /// Update step number, starting at 1
    pub iteration: usize,
    pub centroids: &'a [Centroid],
    pub points: &'a [GeoPoint],
    /// Membership matrix of shape (n_points, k)
    pub memberships: ArrayView2<'a, f64>,
    pub dominant_labels: &'a [usize],
    pub dominant_weights: &'a [f64],
    /// Points that changed dominant label in the weight step of this iteration
    pub changed: usize,
}

impl<'a> FuzzySnapshot<'a> {
    /// Membership vector of a single point
    pub fn membership(&self, point: usize) -> ArrayView1<'a, f64> {
        self.memberships.index_axis_move(Axis(0), point)
    }
}

/// Receives a snapshot after every update step
pub trait IterationObserver {
    fn on_hard_iteration(&mut self, _snapshot: &HardSnapshot<'_>) -> Result<(), ObserverError> {
        Ok(())
    }

    fn on_fuzzy_iteration(&mut self, _snapshot: &FuzzySnapshot<'_>) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// No-op observer
impl IterationObserver for () {}

impl<T: IterationObserver + ?Sized> IterationObserver for &mut T {
    fn on_hard_iteration(&mut self, snapshot: &HardSnapshot<'_>) -> Result<(), ObserverError> {
        (**self).on_hard_iteration(snapshot)
    }

    fn on_fuzzy_iteration(&mut self, snapshot: &FuzzySnapshot<'_>) -> Result<(), ObserverError> {
        (**self).on_fuzzy_iteration(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[derive(Default)]
    struct Counter {
        hard: usize,
        fuzzy: usize,
    }

    impl IterationObserver for Counter {
        fn on_hard_iteration(&mut self, _: &HardSnapshot<'_>) -> Result<(), ObserverError> {
            self.hard += 1;
            Ok(())
        }

        fn on_fuzzy_iteration(&mut self, _: &FuzzySnapshot<'_>) -> Result<(), ObserverError> {
            self.fuzzy += 1;
            Ok(())
        }
    }

    #[test]
    fn test_snapshot_objective() {
        let points = [GeoPoint::new("a", 0.0, 0.0), GeoPoint::new("b", 0.0, 2.0)];
        let centroids = [Centroid::new(0.0, 1.0)];
        let snapshot = HardSnapshot {
            iteration: 1,
            centroids: &centroids,
            points: &points,
            labels: &[0, 0],
            changed: 2,
            degenerate: &[],
        };

        assert_relative_eq!(snapshot.objective(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mut_ref_forwards() {
        let points = [GeoPoint::new("a", 0.0, 0.0)];
        let centroids = [Centroid::new(0.0, 0.0)];
        let memberships = array![[1.0]];
        let fuzzy = FuzzySnapshot {
            iteration: 1,
            centroids: &centroids,
            points: &points,
            memberships: memberships.view(),
            dominant_labels: &[0],
            dominant_weights: &[1.0],
            changed: 1,
        };
        assert_eq!(fuzzy.membership(0)[0], 1.0);

        fn notify<O: IterationObserver>(mut observer: O, snapshot: &FuzzySnapshot<'_>) {
            observer.on_fuzzy_iteration(snapshot).unwrap();
        }

        let mut counter = Counter::default();
        notify(&mut counter, &fuzzy);
        notify(&mut counter, &fuzzy);
        assert_eq!(counter.fuzzy, 2);
        assert_eq!(counter.hard, 0);

        assert!(().on_fuzzy_iteration(&fuzzy).is_ok());
    }
}
