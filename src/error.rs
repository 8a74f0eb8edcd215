use thiserror::Error;

/// Error types for the geocluster library
#[derive(Error, Debug)]
pub enum ClusterError {
    /// The number of clusters k is invalid (no initial centroids were given)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Points, seeds or configuration rejected before the first iteration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Coordinate data does not have the expected (n, 2) shape
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// The iteration cap was reached while points were still changing cluster
    #[error("No convergence after {max_iters} iterations ({changed} points still changing)")]
    NonConvergence { max_iters: usize, changed: usize },

    /// The per-iteration observer failed; the run is aborted
    #[error("Iteration observer failed: {0}")]
    Observer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A centroid that lost all of its assigned points during an update step.
///
/// This never fails a hard clustering run: the centroid keeps its previous
/// position and the event is recorded on the result for diagnostics.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Centroid {centroid} has no assigned points in iteration {iteration}")]
pub struct DegenerateCluster {
    /// Update step (1-based) in which the centroid was empty
    pub iteration: usize,
    /// Index of the empty centroid
    pub centroid: usize,
}
