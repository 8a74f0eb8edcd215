use crate::types::{Centroid, Coordinates};
use rayon::prelude::*;

/// Squared planar distance between two coordinate pairs
#[inline]
pub fn squared_distance<A, B>(a: &A, b: &B) -> f64
where
    A: Coordinates + ?Sized,
    B: Coordinates + ?Sized,
{
    let d_lat = a.lat() - b.lat();
    let d_lng = a.lng() - b.lng();
    d_lat * d_lat + d_lng * d_lng
}

/// Planar Euclidean distance `sqrt((lat1-lat2)^2 + (lng1-lng2)^2)`.
///
/// Latitude and longitude are used as flat coordinates; no geodesic
/// correction is applied.
#[inline]
pub fn euclidean_distance<A, B>(a: &A, b: &B) -> f64
where
    A: Coordinates + ?Sized,
    B: Coordinates + ?Sized,
{
    squared_distance(a, b).sqrt()
}

/// Find the nearest centroid for a single point
///
/// Every centroid is checked in ascending index order and only a strictly
/// smaller distance replaces the current best, so the lowest index wins ties.
///
/// # Returns
/// * `(label, distance)` - Index of the nearest centroid and the distance to it
pub fn nearest_centroid<P>(point: &P, centroids: &[Centroid]) -> (usize, f64)
where
    P: Coordinates + ?Sized,
{
    let mut best_label = 0;
    let mut best_dist = f64::INFINITY;

    for (j, centroid) in centroids.iter().enumerate() {
        let dist = euclidean_distance(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_label = j;
        }
    }

    (best_label, best_dist)
}

/// Assign every point to its nearest centroid
///
/// Points are processed in parallel against the same centroid snapshot;
/// labels come back in point order.
pub fn assign_labels<P>(points: &[P], centroids: &[Centroid]) -> Vec<usize>
where
    P: Coordinates + Sync,
{
    points
        .par_iter()
        .map(|point| nearest_centroid(point, centroids).0)
        .collect()
}

/// Total squared distance from each point to its assigned centroid
pub fn sum_of_squared_errors<P>(points: &[P], labels: &[usize], centroids: &[Centroid]) -> f64
where
    P: Coordinates + Sync,
{
    points
        .par_iter()
        .zip(labels.par_iter())
        .map(|(point, &label)| squared_distance(point, &centroids[label]))
        .sum()
}

/// Compute centroid shift (sum of distances moved by each centroid)
pub fn compute_centroid_shift(old_centroids: &[Centroid], new_centroids: &[Centroid]) -> f64 {
    old_centroids
        .iter()
        .zip(new_centroids)
        .map(|(old_c, new_c)| euclidean_distance(old_c, new_c))
        .sum()
}
