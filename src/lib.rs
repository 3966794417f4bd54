// Library exports for testing and reusability

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use cache::BoundaryCache;
use config::EngineConfig;
use services::boundary_source::BoundarySource;
use services::mask::MaskCompositor;
use services::region_registry::RegionRegistry;
use services::ring_policy::{policy_for, RingPolicy};
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub registry: Arc<RegionRegistry>,
    pub boundary_source: Arc<dyn BoundarySource>,
    pub cache: Option<Arc<dyn BoundaryCache>>,
    pub ring_policy: Box<dyn RingPolicy>,
    pub mask_compositor: MaskCompositor,
}

impl AppState {
    pub fn new(
        registry: Arc<RegionRegistry>,
        boundary_source: Arc<dyn BoundarySource>,
        cache: Option<Arc<dyn BoundaryCache>>,
        engine: &EngineConfig,
    ) -> Self {
        AppState {
            registry,
            boundary_source,
            cache,
            ring_policy: policy_for(engine.ring_selection),
            mask_compositor: MaskCompositor::new(engine.hole_winding),
        }
    }
}
