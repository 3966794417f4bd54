use crate::models::GeoCoordinate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A visitable place, owned by the region that contains it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub coordinate: GeoCoordinate,
    /// Free-form category label as shown in the catalog (e.g. "historic")
    pub category: String,
    /// Average visitor rating, 0-5
    pub rating: f64,
    /// Visit count used for popularity ranking
    pub popularity: i64,
}

/// Catalog entry for a point of interest, before ids are assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct PoiSeed {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub popularity: i64,
}

impl PointOfInterest {
    pub fn new(
        name: String,
        coordinate: GeoCoordinate,
        category: String,
        rating: f64,
        popularity: i64,
    ) -> Self {
        PointOfInterest {
            id: Uuid::new_v4().to_string(),
            name,
            coordinate,
            category,
            rating: rating.clamp(0.0, 5.0),
            popularity: popularity.max(0),
        }
    }

    /// Case-insensitive category match. "All" matches everything.
    pub fn matches_category(&self, category: &str) -> bool {
        let category = category.trim();
        category.is_empty()
            || category.eq_ignore_ascii_case("all")
            || self.category.to_lowercase() == category.to_lowercase()
    }
}

impl From<PoiSeed> for PointOfInterest {
    fn from(seed: PoiSeed) -> Self {
        let mut poi = PointOfInterest::new(
            seed.name,
            GeoCoordinate::from_raw(seed.lat, seed.lng),
            seed.category,
            seed.rating,
            seed.popularity,
        );
        if let Some(id) = seed.id.filter(|id| !id.trim().is_empty()) {
            poi.id = id;
        }
        poi
    }
}
