use async_trait::async_trait;
use regionmap::config::EngineConfig;
use regionmap::models::{BoundaryGeometry, GeoCoordinate, RegionSeed, Ring};
use regionmap::services::boundary_source::BoundarySource;
use regionmap::services::region_registry::RegionRegistry;
use regionmap::{AppError, Result};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ring from `(lat, lng)` pairs
#[allow(dead_code)]
pub fn ring(points: &[(f64, f64)]) -> Ring {
    Ring::new(
        points
            .iter()
            .map(|&(lat, lng)| GeoCoordinate::from_raw(lat, lng))
            .collect(),
    )
}

/// Axis-aligned square, open (no closing point)
#[allow(dead_code)]
pub fn square_ring(min: f64, max: f64) -> Ring {
    ring(&[(min, min), (min, max), (max, max), (max, min)])
}

/// Seeds for a small catalog with points of interest in two regions
#[allow(dead_code)]
pub fn test_seeds() -> Vec<RegionSeed> {
    serde_json::from_value(json!([
        {
            "name": "Amman",
            "points_of_interest": [
                { "id": "citadel", "name": "Amman Citadel", "lat": 31.9544, "lng": 35.9346, "category": "historical", "rating": 4.6, "popularity": 4200 },
                { "id": "rainbow", "name": "Rainbow Street", "lat": 31.9497, "lng": 35.9225, "category": "cafes", "rating": 4.3, "popularity": 3800 }
            ]
        },
        {
            "name": "Jerash",
            "points_of_interest": [
                { "id": "jerash", "name": "Jerash Ruins", "lat": 32.2803, "lng": 35.8911, "category": "historical", "rating": 4.9, "popularity": 7000 }
            ]
        },
        {
            "name": "Aqaba",
            "points_of_interest": [
                { "id": "beach", "name": "South Beach", "lat": 29.4300, "lng": 34.9750, "category": "beaches", "rating": 4.4, "popularity": 4500 }
            ]
        }
    ]))
    .unwrap()
}

#[allow(dead_code)]
pub fn test_registry() -> RegionRegistry {
    RegionRegistry::build(test_seeds(), &EngineConfig::default())
}

/// Boundary source answering every name with the same result, counting calls
#[allow(dead_code)]
pub struct StaticBoundarySource {
    geometry: Option<BoundaryGeometry>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl StaticBoundarySource {
    pub fn returning(geometry: BoundaryGeometry) -> Self {
        StaticBoundarySource {
            geometry: Some(geometry),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        StaticBoundarySource {
            geometry: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BoundarySource for StaticBoundarySource {
    async fn fetch_boundary(&self, _name: &str) -> Result<BoundaryGeometry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.geometry
            .clone()
            .ok_or_else(|| AppError::BoundaryService("service unavailable".to_string()))
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// FeatureCollection with one polygon per `(region_id, ring)` pair.
/// Rings are `(lat, lng)` and written as GeoJSON `[lng, lat]`.
#[allow(dead_code)]
pub fn feature_collection(features: &[(Option<&str>, &Ring)]) -> Vec<u8> {
    let features: Vec<_> = features
        .iter()
        .map(|(region_id, ring)| {
            let coordinates: Vec<[f64; 2]> =
                ring.points().iter().map(|p| [p.lng, p.lat]).collect();
            let properties = match region_id {
                Some(id) => json!({ "region_id": id }),
                None => json!({}),
            };
            json!({
                "type": "Feature",
                "properties": properties,
                "geometry": { "type": "Polygon", "coordinates": [coordinates] }
            })
        })
        .collect();

    serde_json::to_vec(&json!({ "type": "FeatureCollection", "features": features })).unwrap()
}
