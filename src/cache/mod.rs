pub mod memory;

pub use memory::MemoryBoundaryCache;

use crate::models::BoundaryGeometry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cache for decoded boundaries fetched from a remote source.
#[async_trait]
pub trait BoundaryCache: Send + Sync {
    async fn get_boundary(&self, key: &str) -> Option<BoundaryGeometry>;
    async fn cache_boundary(&self, key: &str, geometry: &BoundaryGeometry);
    async fn get_stats(&self) -> CacheStats;
    fn backend_name(&self) -> &'static str;
}

/// Generate a cache key for a boundary lookup by place name.
/// Case and surrounding whitespace do not matter.
pub fn boundary_cache_key(name: &str) -> String {
    format!("boundary:{}", name.trim().to_lowercase())
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: u64,
}
