use crate::error::{AppError, Result};
use crate::models::{haversine_distance_km, DistanceKm, GeoCoordinate, PointOfInterest};
use crate::services::catalog::{PoiQuery, SortOption};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for the points-of-interest list
#[derive(Debug, Default, Deserialize)]
pub struct PoiQueryParams {
    /// Category label, "All" for no filter
    #[serde(default)]
    pub category: Option<String>,
    /// Name search text
    #[serde(default)]
    pub q: Option<String>,
    /// distance | rating | popularity (default: distance)
    #[serde(default)]
    pub sort: Option<String>,
    /// Restrict to the points of one region
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl PoiQueryParams {
    /// Validate and convert into a catalog query.
    pub fn into_query(self) -> Result<PoiQuery> {
        let sort = match self.sort.as_deref() {
            None | Some("") => SortOption::default(),
            Some(s) => s.parse::<SortOption>().map_err(AppError::InvalidRequest)?,
        };

        let origin = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                Some(GeoCoordinate::new(lat, lng).map_err(AppError::InvalidRequest)?)
            }
            (None, None) => None,
            _ => {
                return Err(AppError::InvalidRequest(
                    "lat and lng must be given together".to_string(),
                ))
            }
        };

        Ok(PoiQuery {
            category: self.category,
            search: self.q,
            sort,
            origin,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PoiView {
    #[serde(flatten)]
    pub poi: PointOfInterest,
    /// Distance from the query origin, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<DistanceKm>,
}

#[derive(Debug, Serialize)]
pub struct PoiListResponse {
    pub count: usize,
    pub pois: Vec<PoiView>,
}

/// GET /pois
pub async fn list_pois(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PoiQueryParams>,
) -> Result<Json<PoiListResponse>> {
    let region_id = params.region.clone();
    let query = params.into_query()?;

    let candidates = match region_id {
        Some(id) => state
            .registry
            .select_by_id(&id)
            .ok_or_else(|| AppError::NotFound(format!("Region '{}' not found", id)))?
            .points_of_interest
            .clone(),
        None => state.registry.all_points_of_interest(),
    };

    let pois: Vec<PoiView> = query
        .apply(&candidates)
        .into_iter()
        .map(|poi| PoiView {
            distance_km: query
                .origin
                .map(|origin| DistanceKm::from_raw(haversine_distance_km(&origin, &poi.coordinate))),
            poi,
        })
        .collect();

    tracing::debug!(
        "POI query (category={:?}, sort={:?}) returned {} of {} points",
        query.category,
        query.sort,
        pois.len(),
        candidates.len()
    );

    Ok(Json(PoiListResponse {
        count: pois.len(),
        pois,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_defaults() {
        let query = PoiQueryParams::default().into_query().unwrap();
        assert_eq!(query.sort, SortOption::Distance);
        assert!(query.origin.is_none());
    }

    #[test]
    fn test_params_invalid_sort() {
        let params = PoiQueryParams {
            sort: Some("alphabetical".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.into_query(), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_params_half_origin_rejected() {
        let params = PoiQueryParams {
            lat: Some(31.95),
            ..Default::default()
        };
        assert!(params.into_query().is_err());
    }

    #[test]
    fn test_params_out_of_range_origin_rejected() {
        let params = PoiQueryParams {
            lat: Some(95.0),
            lng: Some(35.9),
            ..Default::default()
        };
        assert!(params.into_query().is_err());
    }
}
