use crate::error::ClusterError;

/// Weight used in place of `1 / distance^2` when a point coincides with a
/// centroid and the inverse would be infinite.
pub const ZERO_DISTANCE_WEIGHT: f64 = 100.0;

/// Configuration shared by the hard and fuzzy clusterers
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Maximum number of update steps before the run fails with
    /// [`ClusterError::NonConvergence`].
    pub max_iters: usize,

    /// Fuzzy weight substituted for a point sitting exactly on a centroid.
    /// Must be finite and positive.
    pub zero_distance_weight: f64,

    /// Log per-iteration progress at `info` level instead of `debug`
    pub verbose: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_iters: 300,
            zero_distance_weight: ZERO_DISTANCE_WEIGHT,
            verbose: false,
        }
    }
}

impl ClusterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the weight used for zero point-to-centroid distances
    pub fn with_zero_distance_weight(mut self, weight: f64) -> Self {
        self.zero_distance_weight = weight;
        self
    }

    /// Set verbose mode
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ClusterError> {
        if self.max_iters == 0 {
            return Err(ClusterError::InvalidInput(
                "max_iters must be greater than 0".to_string(),
            ));
        }
        if !self.zero_distance_weight.is_finite() || self.zero_distance_weight <= 0.0 {
            return Err(ClusterError::InvalidInput(format!(
                "zero_distance_weight must be finite and positive, got {}",
                self.zero_distance_weight
            )));
        }
        Ok(())
    }
}
