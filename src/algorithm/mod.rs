pub mod fuzzy;
pub mod hard;

use crate::config::ClusterConfig;
use crate::distance::compute_centroid_shift;
use crate::error::ClusterError;
use crate::observer::{IterationObserver, ObserverError};
use crate::types::{Centroid, GeoPoint, MAX_COORDINATE_MAGNITUDE};
use log::Level;
use std::time::Instant;

/// One clustering engine driven by [`run_to_convergence`]
pub(crate) trait ClusterLoop {
    /// Name used in log messages
    const NAME: &'static str;

    /// Assign (or weight) every point against the current centroids.
    /// Returns the number of points whose decision changed.
    fn assign(&mut self) -> usize;

    /// Re-estimate centroid positions from the last assignment
    fn update(&mut self, iteration: usize);

    fn centroids(&self) -> &[Centroid];

    /// Hand the current state to the observer
    fn notify(
        &self,
        iteration: usize,
        changed: usize,
        observer: &mut dyn IterationObserver,
    ) -> Result<(), ObserverError>;
}

/// Reject inputs that cannot start a run
pub(crate) fn validate_inputs(
    points: &[GeoPoint],
    seeds: &[Centroid],
    config: &ClusterConfig,
) -> Result<(), ClusterError> {
    if seeds.is_empty() {
        return Err(ClusterError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }

    if points.is_empty() {
        return Err(ClusterError::InvalidInput(
            "point set must not be empty".to_string(),
        ));
    }

    if let Some(point) = points.iter().find(|p| !p.is_finite()) {
        return Err(ClusterError::InvalidInput(format!(
            "point '{}' has non-finite coordinates ({}, {})",
            point.id, point.lat, point.lng
        )));
    }

    if let Some((idx, seed)) = seeds.iter().enumerate().find(|(_, c)| !c.is_finite()) {
        return Err(ClusterError::InvalidInput(format!(
            "seed {} has non-finite coordinates ({}, {})",
            idx, seed.lat, seed.lng
        )));
    }

    if let Some(point) = points.iter().find(|p| !p.in_range()) {
        return Err(ClusterError::InvalidInput(format!(
            "point '{}' has coordinates ({}, {}) beyond magnitude {:e}",
            point.id, point.lat, point.lng, MAX_COORDINATE_MAGNITUDE
        )));
    }

    if let Some((idx, seed)) = seeds.iter().enumerate().find(|(_, c)| !c.in_range()) {
        return Err(ClusterError::InvalidInput(format!(
            "seed {} has coordinates ({}, {}) beyond magnitude {:e}",
            idx, seed.lat, seed.lng, MAX_COORDINATE_MAGNITUDE
        )));
    }

    config.validate()
}

/// Run assign -> check -> update -> observe until no decision changes
///
/// Returns the number of update steps performed. The final assign pass that
/// detects convergence is not counted as an iteration.
pub(crate) fn run_to_convergence<L: ClusterLoop>(
    engine: &mut L,
    config: &ClusterConfig,
    observer: &mut dyn IterationObserver,
) -> Result<usize, ClusterError> {
    let level = if config.verbose {
        Level::Info
    } else {
        Level::Debug
    };
    let mut n_iterations = 0;

    loop {
        let iter_start = Instant::now();
        let changed = engine.assign();

        if changed == 0 {
            log::info!(
                "{} converged after {} iterations",
                L::NAME,
                n_iterations
            );
            return Ok(n_iterations);
        }

        if n_iterations == config.max_iters {
            log::warn!(
                "{} did not converge after {} iterations ({} points still changing)",
                L::NAME,
                config.max_iters,
                changed
            );
            return Err(ClusterError::NonConvergence {
                max_iters: config.max_iters,
                changed,
            });
        }

        n_iterations += 1;
        let prev_centroids = log::log_enabled!(level).then(|| engine.centroids().to_vec());
        engine.update(n_iterations);

        if let Some(prev_centroids) = prev_centroids {
            let shift = compute_centroid_shift(&prev_centroids, engine.centroids());
            log::log!(
                level,
                "  {} iteration {}/{}: changed = {}, shift = {:.6}, time = {:.4}s",
                L::NAME,
                n_iterations,
                config.max_iters,
                changed,
                shift,
                iter_start.elapsed().as_secs_f64()
            );
        }

        engine
            .notify(n_iterations, changed, observer)
            .map_err(ClusterError::Observer)?;
    }
}
