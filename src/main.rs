use axum::Router;
use regionmap::cache::{BoundaryCache, MemoryBoundaryCache};
use regionmap::config::Config;
use regionmap::services::boundary_source::{load_feature_collection, BoundarySource};
use regionmap::services::nominatim::NominatimClient;
use regionmap::services::region_registry::{load_region_seeds, RegionRegistry};
use regionmap::services::ring_policy::policy_for;
use regionmap::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regionmap=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting regionmap API server");
    tracing::info!("Configuration loaded successfully");

    // Build the region registry from the catalog
    let seeds = load_region_seeds(&config.region_seeds_path).await?;
    let registry = Arc::new(RegionRegistry::build(seeds, &config.engine));

    // Attach bundled boundaries in the background; regions show fallback
    // centroids until this finishes
    if let Some(boundary_file) = config.boundary_file.clone() {
        let registry = registry.clone();
        let region_key = config.boundary_region_key.clone();
        let ring_selection = config.engine.ring_selection;
        tokio::spawn(async move {
            match load_feature_collection(&boundary_file).await {
                Ok(features) => {
                    let policy = policy_for(ring_selection);
                    let updated = registry.attach_features(&features, policy.as_ref(), &region_key);
                    tracing::info!(
                        "Boundary file {} attached to {} of {} regions",
                        boundary_file,
                        updated,
                        registry.len()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load boundary file {}: {}. Regions keep fallback centroids.",
                        boundary_file,
                        e
                    );
                }
            }
        });
    } else {
        tracing::info!("BOUNDARY_FILE not configured. Regions keep fallback centroids.");
    }

    // Initialize boundary source and cache
    let boundary_source: Arc<dyn BoundarySource> = Arc::new(NominatimClient::with_config(
        config.nominatim_base_url.clone(),
        config.nominatim_user_agent.clone(),
    ));
    let cache: Arc<dyn BoundaryCache> = Arc::new(MemoryBoundaryCache::new(
        config.boundary_cache_ttl,
        config.boundary_cache_max_entries,
    ));

    // Create application state
    let state = Arc::new(AppState::new(
        registry,
        boundary_source,
        Some(cache),
        &config.engine,
    ));

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", regionmap::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
