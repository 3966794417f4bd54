use crate::constants::EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
///
/// The engine accepts any values; use [`GeoCoordinate::new`] at request
/// boundaries where out-of-range input should be rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(GeoCoordinate { lat, lng })
    }

    /// Build a coordinate without range checks.
    pub const fn from_raw(lat: f64, lng: f64) -> Self {
        GeoCoordinate { lat, lng }
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &GeoCoordinate) -> f64 {
        haversine_distance_km(self, other)
    }
}

/// Calculate distance between two coordinates using the Haversine formula.
/// Returns distance in kilometers.
pub fn haversine_distance_km(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
