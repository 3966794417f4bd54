use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Report registry and cache state
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    status["checks"]["regions"] = json!(state.registry.len());
    status["checks"]["regions_with_boundary"] = json!(state.registry.attached_count());
    status["checks"]["boundary_source"] = json!(state.boundary_source.source_name());

    match state.cache {
        Some(ref cache) => {
            let stats = cache.get_stats().await;
            status["checks"]["cache"] = json!({
                "backend": cache.backend_name(),
                "stats": stats,
            });
        }
        None => {
            status["checks"]["cache"] = json!("disabled");
        }
    }

    if state.registry.is_empty() {
        status["status"] = json!("degraded");
    }

    Json(status)
}
