use crate::cache::boundary_cache_key;
use crate::error::{AppError, Result};
use crate::models::{BoundaryGeometry, BoundingBox, GeoCoordinate, PointOfInterest, Region, Ring};
use crate::services::mask::SpotlightMask;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Region as listed on the map overview.
#[derive(Debug, Serialize)]
pub struct RegionSummary {
    pub id: String,
    pub name: String,
    pub centroid: GeoCoordinate,
    pub color: String,
    pub default_zoom: f32,
    pub boundary_rings: Vec<Ring>,
    pub bounds: Option<BoundingBox>,
    pub poi_count: usize,
}

impl From<&Region> for RegionSummary {
    fn from(region: &Region) -> Self {
        RegionSummary {
            id: region.id.clone(),
            name: region.name.clone(),
            centroid: region.centroid,
            color: region.display_color.hex(),
            default_zoom: region.default_zoom,
            boundary_rings: region.boundary_rings.clone(),
            bounds: region.bounds(),
            poi_count: region.points_of_interest.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegionListResponse {
    pub regions: Vec<RegionSummary>,
}

/// Full region with description, events and points of interest.
#[derive(Debug, Serialize)]
pub struct RegionDetail {
    #[serde(flatten)]
    pub summary: RegionSummary,
    pub description: String,
    pub events: Vec<String>,
    pub points_of_interest: Vec<PointOfInterest>,
}

impl From<&Region> for RegionDetail {
    fn from(region: &Region) -> Self {
        RegionDetail {
            summary: RegionSummary::from(region),
            description: region.description.clone(),
            events: region.events.clone(),
            points_of_interest: region.points_of_interest.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MaskResponse {
    /// Region id or country name the mask was built for
    pub target: String,
    /// False when the hole is empty and the mask covers the whole world
    pub has_hole: bool,
    #[serde(flatten)]
    pub mask: SpotlightMask,
}

impl MaskResponse {
    fn new(target: String, mask: SpotlightMask) -> Self {
        MaskResponse {
            target,
            has_hole: !mask.hole.is_empty(),
            mask,
        }
    }
}

/// GET /regions
pub async fn list_regions(State(state): State<Arc<AppState>>) -> Json<RegionListResponse> {
    let regions = state
        .registry
        .regions()
        .iter()
        .map(|region| RegionSummary::from(region.as_ref()))
        .collect();

    Json(RegionListResponse { regions })
}

/// GET /regions/{id}
pub async fn get_region(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RegionDetail>> {
    let region = state
        .registry
        .select_by_id(&id)
        .ok_or_else(|| AppError::NotFound(format!("Region '{}' not found", id)))?;

    Ok(Json(RegionDetail::from(region.as_ref())))
}

/// GET /regions/lookup?name=
pub async fn lookup_region(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> Result<Json<RegionDetail>> {
    if params.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("name must not be empty".to_string()));
    }

    let region = state
        .registry
        .select_by_name(&params.name)
        .ok_or_else(|| AppError::NotFound(format!("Region '{}' not found", params.name)))?;

    Ok(Json(RegionDetail::from(region.as_ref())))
}

/// GET /regions/{id}/mask
/// Spotlight mask cut around the region's principal ring.
pub async fn get_region_mask(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MaskResponse>> {
    let region = state
        .registry
        .select_by_id(&id)
        .ok_or_else(|| AppError::NotFound(format!("Region '{}' not found", id)))?;

    let mask = state.mask_compositor.compose_rings(&region.boundary_rings);
    Ok(Json(MaskResponse::new(region.id.clone(), mask)))
}

/// GET /countries/{name}/mask
/// Spotlight mask around a country boundary from the boundary source.
/// A failed fetch gives a full-world cover rather than an error.
pub async fn get_country_mask(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<MaskResponse>> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::InvalidRequest(
            "country name must not be empty".to_string(),
        ));
    }

    let geometry = fetch_country_boundary(&state, &name).await;
    let rings = state.ring_policy.select(&geometry);
    let mask = state.mask_compositor.compose_rings(&rings);

    tracing::info!(
        "Country mask for '{}': {} parts, hole of {} points",
        name,
        geometry.part_count(),
        mask.hole.len()
    );

    Ok(Json(MaskResponse::new(name, mask)))
}

async fn fetch_country_boundary(state: &AppState, name: &str) -> BoundaryGeometry {
    let cache_key = boundary_cache_key(name);

    // Check cache first
    if let Some(ref cache) = state.cache {
        if let Some(geometry) = cache.get_boundary(&cache_key).await {
            tracing::debug!("Cache hit for country boundary: {}", name);
            return geometry;
        }
    }

    match state.boundary_source.fetch_boundary(name).await {
        Ok(geometry) => {
            // Only usable boundaries are cached so that a later fetch can recover
            if !geometry.is_empty() {
                if let Some(ref cache) = state.cache {
                    cache.cache_boundary(&cache_key, &geometry).await;
                }
            }
            geometry
        }
        Err(e) => {
            tracing::warn!(
                "Boundary fetch from {} failed for '{}': {}",
                state.boundary_source.source_name(),
                name,
                e
            );
            BoundaryGeometry::Empty
        }
    }
}
