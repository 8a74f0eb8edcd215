use crate::error::ClusterError;
use ndarray::{Array2, ArrayView2};

/// Largest accepted coordinate magnitude.
///
/// Squared distances between coordinates within this bound stay finite and
/// their inverses stay positive.
pub const MAX_COORDINATE_MAGNITUDE: f64 = 1e100;

fn within_bound(lat: f64, lng: f64) -> bool {
    lat.abs() <= MAX_COORDINATE_MAGNITUDE && lng.abs() <= MAX_COORDINATE_MAGNITUDE
}

/// Anything with a latitude/longitude pair.
pub trait Coordinates {
    fn lat(&self) -> f64;
    fn lng(&self) -> f64;
}

/// An input point. Coordinates are treated as planar values.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
        }
    }

    /// Build points from a `(n_samples, 2)` matrix of `[lat, lng]` rows.
    ///
    /// Each point's id is its row index.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidDimensions`] if the matrix does not have
    /// exactly two columns.
    pub fn from_rows(data: &ArrayView2<f64>) -> Result<Vec<Self>, ClusterError> {
        if data.ncols() != 2 {
            return Err(ClusterError::InvalidDimensions(format!(
                "Expected 2 coordinate columns (lat, lng), got {}",
                data.ncols()
            )));
        }

        Ok(data
            .outer_iter()
            .enumerate()
            .map(|(i, row)| Self::new(i.to_string(), row[0], row[1]))
            .collect())
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    pub(crate) fn in_range(&self) -> bool {
        within_bound(self.lat, self.lng)
    }
}

impl Coordinates for GeoPoint {
    #[inline]
    fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    fn lng(&self) -> f64 {
        self.lng
    }
}

/// Cluster representative. Identified by its index in the centroid list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub lat: f64,
    pub lng: f64,
}

impl Centroid {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    pub(crate) fn in_range(&self) -> bool {
        within_bound(self.lat, self.lng)
    }
}

impl Coordinates for Centroid {
    #[inline]
    fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    fn lng(&self) -> f64 {
        self.lng
    }
}

impl From<&GeoPoint> for Centroid {
    fn from(point: &GeoPoint) -> Self {
        Self::new(point.lat, point.lng)
    }
}

/// Centroids as a `(k, 2)` array of `[lat, lng]` rows
pub(crate) fn centroids_to_array(centroids: &[Centroid]) -> Array2<f64> {
    Array2::from_shape_fn((centroids.len(), 2), |(i, j)| {
        if j == 0 {
            centroids[i].lat
        } else {
            centroids[i].lng
        }
    })
}
