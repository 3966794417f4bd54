use crate::cache::{BoundaryCache, CacheStats};
use crate::models::BoundaryGeometry;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory boundary cache backed by moka with TTL and bounded capacity.
/// All methods take `&self`; moka handles synchronization.
pub struct MemoryBoundaryCache {
    boundaries: Cache<String, Arc<BoundaryGeometry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryBoundaryCache {
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let boundaries = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        MemoryBoundaryCache {
            boundaries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl BoundaryCache for MemoryBoundaryCache {
    async fn get_boundary(&self, key: &str) -> Option<BoundaryGeometry> {
        match self.boundaries.get(key).await {
            Some(geometry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache hit for boundary: {}", key);
                Some((*geometry).clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache miss for boundary: {}", key);
                None
            }
        }
    }

    async fn cache_boundary(&self, key: &str, geometry: &BoundaryGeometry) {
        self.boundaries
            .insert(key.to_string(), Arc::new(geometry.clone()))
            .await;
        tracing::debug!(
            "Memory cached boundary with {} parts: {}",
            geometry.part_count(),
            key
        );
    }

    async fn get_stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            entries: self.boundaries.entry_count(),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
