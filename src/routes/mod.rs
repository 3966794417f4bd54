pub mod debug;
pub mod itinerary;
pub mod pois;
pub mod regions;

use axum::{routing::{get, post}, Router};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/regions", get(regions::list_regions))
        .route("/regions/lookup", get(regions::lookup_region))
        .route("/regions/{id}", get(regions::get_region))
        .route("/regions/{id}/mask", get(regions::get_region_mask))
        .route("/countries/{name}/mask", get(regions::get_country_mask))
        .route("/pois", get(pois::list_pois))
        .route("/itinerary", post(itinerary::plan_itinerary))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
