use crate::error::{AppError, Result};
use crate::models::GeoCoordinate;
use crate::services::itinerary::{plan_itinerary_stops, ItineraryStop, TripSelection};
use crate::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    pub start: GeoCoordinate,
    #[serde(default)]
    pub poi_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub start: GeoCoordinate,
    pub stops: Vec<ItineraryStop>,
}

/// POST /itinerary
/// Order the selected points of interest by distance from the start
pub async fn plan_itinerary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ItineraryRequest>,
) -> Result<Json<ItineraryResponse>> {
    let start = GeoCoordinate::new(request.start.lat, request.start.lng)
        .map_err(AppError::InvalidRequest)?;

    let selection = TripSelection::from_ids(request.poi_ids);
    let candidates = selection
        .resolve(|id| state.registry.find_poi(id))
        .map_err(|missing| {
            AppError::InvalidRequest(format!(
                "Unknown points of interest: {}",
                missing.join(", ")
            ))
        })?;

    let stops = plan_itinerary_stops(&start, &candidates);

    tracing::info!(
        "Itinerary from ({:.4}, {:.4}) with {} stops",
        start.lat,
        start.lng,
        stops.len()
    );

    Ok(Json(ItineraryResponse { start, stops }))
}
