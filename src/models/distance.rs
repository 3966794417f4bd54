use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance in kilometers
/// Keeps planner output from being confused with degree-space values
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceKm(pub f64);

impl DistanceKm {
    /// Get the raw kilometers value
    pub fn as_km(self) -> f64 {
        self.0
    }

    /// Create from raw value without validation (use carefully)
    pub fn from_raw(km: f64) -> Self {
        DistanceKm(km)
    }

    /// Total ordering, so NaN from bad input sorts last instead of panicking
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for DistanceKm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}km", self.0)
    }
}
