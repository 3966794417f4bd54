use crate::config::EngineConfig;
use crate::constants::DEFAULT_REGION_ZOOM;
use crate::models::{ColorIndex, PointOfInterest, Region, RegionSeed, Ring};
use crate::services::centroid::{strategy_for, CentroidStrategy};
use crate::services::geojson_decoder::DecodedFeature;
use crate::services::ring_policy::RingPolicy;
use crate::error::{AppError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Read the region catalog, a JSON array of seeds.
pub async fn load_region_seeds(path: impl AsRef<Path>) -> Result<Vec<RegionSeed>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Catalog(format!("cannot read {}: {}", path.display(), e)))?;
    let seeds: Vec<RegionSeed> = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Catalog(format!("invalid catalog {}: {}", path.display(), e)))?;

    tracing::info!("Loaded {} region seeds from {}", seeds.len(), path.display());
    Ok(seeds)
}

/// The set of named regions shown on the map.
///
/// Each region sits in its own slot as an immutable `Arc<Region>` snapshot.
/// Attaching a boundary builds a complete new snapshot (rings and centroid
/// together) and swaps the pointer, so a reader holding or fetching a
/// region always sees either the old or the new state in full.
pub struct RegionRegistry {
    slots: Vec<RwLock<Arc<Region>>>,
    centroid_strategy: Box<dyn CentroidStrategy>,
}

impl RegionRegistry {
    /// Create regions with empty boundaries and fallback centroids. Colors
    /// follow catalog position.
    pub fn build(seeds: Vec<RegionSeed>, config: &EngineConfig) -> Self {
        let slots = seeds
            .into_iter()
            .enumerate()
            .map(|(position, seed)| {
                let region = Region {
                    id: seed.id.unwrap_or_else(|| position.to_string()),
                    name: seed.name,
                    description: seed.description,
                    events: seed.events,
                    default_zoom: seed.default_zoom.unwrap_or(DEFAULT_REGION_ZOOM),
                    boundary_rings: Vec::new(),
                    centroid: seed.fallback_centroid.unwrap_or(config.fallback_centroid),
                    display_color: ColorIndex::for_position(position),
                    points_of_interest: seed
                        .points_of_interest
                        .into_iter()
                        .map(PointOfInterest::from)
                        .collect(),
                };
                RwLock::new(Arc::new(region))
            })
            .collect::<Vec<_>>();

        tracing::info!("Region registry built with {} regions", slots.len());

        RegionRegistry {
            slots,
            centroid_strategy: strategy_for(config.centroid_method),
        }
    }

    /// Attach boundaries by position: `feature_rings[i]` belongs to the
    /// i-th region of the catalog. Returns the number of regions updated.
    pub fn attach_geometry(&self, feature_rings: &BTreeMap<usize, Vec<Ring>>) -> usize {
        let mut updated = 0;
        for (&position, rings) in feature_rings {
            if position >= self.slots.len() {
                tracing::warn!(
                    "Boundary feature {} has no matching region ({} regions)",
                    position,
                    self.slots.len()
                );
                continue;
            }
            if self.replace_geometry(position, rings.clone()) {
                updated += 1;
            }
        }

        tracing::info!("Attached boundaries to {} regions", updated);
        updated
    }

    /// Attach decoded features. A feature whose `region_key` property (or,
    /// lacking that, its feature `id`) names a region id goes to that region;
    /// a feature with neither falls back to its position in the collection.
    pub fn attach_features(
        &self,
        features: &[DecodedFeature],
        policy: &dyn RingPolicy,
        region_key: &str,
    ) -> usize {
        let mut updated = 0;
        for feature in features {
            let position = match feature.region_ref(region_key) {
                Some(region_id) => match self.position_of(&region_id) {
                    Some(position) => position,
                    None => {
                        tracing::warn!(
                            "Boundary feature {} names unknown region '{}'",
                            feature.index,
                            region_id
                        );
                        continue;
                    }
                },
                None if feature.index < self.slots.len() => feature.index,
                None => {
                    tracing::warn!(
                        "Boundary feature {} has no '{}' property or id and no region at that position",
                        feature.index,
                        region_key
                    );
                    continue;
                }
            };

            if self.replace_geometry(position, policy.select(&feature.geometry)) {
                updated += 1;
            }
        }

        tracing::info!(
            "Attached boundaries to {} regions from {} features",
            updated,
            features.len()
        );
        updated
    }

    /// Attach rings to the region with `id`. Returns false if the id is
    /// unknown or the rings are unusable.
    pub fn attach_to_region(&self, id: &str, rings: Vec<Ring>) -> bool {
        match self.position_of(id) {
            Some(position) => self.replace_geometry(position, rings),
            None => false,
        }
    }

    pub fn select_by_id(&self, id: &str) -> Option<Arc<Region>> {
        self.position_of(id).map(|position| self.snapshot(position))
    }

    /// Exact name match first, then a case-insensitive one.
    pub fn select_by_name(&self, name: &str) -> Option<Arc<Region>> {
        let name = name.trim();
        let regions = self.regions();
        let found = regions
            .iter()
            .find(|r| r.name == name)
            .or_else(|| regions.iter().find(|r| r.name.to_lowercase() == name.to_lowercase()));
        found.cloned()
    }

    /// Snapshot of every region in catalog order.
    pub fn regions(&self) -> Vec<Arc<Region>> {
        (0..self.slots.len()).map(|i| self.snapshot(i)).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of regions that currently have a boundary.
    pub fn attached_count(&self) -> usize {
        self.regions().iter().filter(|r| r.has_boundary()).count()
    }

    pub fn all_points_of_interest(&self) -> Vec<PointOfInterest> {
        self.regions()
            .iter()
            .flat_map(|r| r.points_of_interest.iter().cloned())
            .collect()
    }

    pub fn find_poi(&self, id: &str) -> Option<PointOfInterest> {
        self.regions()
            .iter()
            .find_map(|r| r.find_poi(id).cloned())
    }

    fn snapshot(&self, position: usize) -> Arc<Region> {
        self.slots[position]
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        (0..self.slots.len()).find(|&i| self.snapshot(i).id == id)
    }

    fn replace_geometry(&self, position: usize, rings: Vec<Ring>) -> bool {
        let rings: Vec<Ring> = rings.into_iter().filter(|r| !r.is_degenerate()).collect();
        let Some(centroid) = rings.first().and_then(|r| self.centroid_strategy.centroid(r)) else {
            return false;
        };

        let slot = &self.slots[position];
        let current = slot.read().unwrap_or_else(PoisonError::into_inner).clone();
        let next = Arc::new(current.with_geometry(rings, centroid));

        tracing::debug!(
            "Region '{}' boundary attached: {} rings, centroid ({:.4}, {:.4})",
            next.id,
            next.boundary_rings.len(),
            centroid.lat,
            centroid.lng
        );

        *slot.write().unwrap_or_else(PoisonError::into_inner) = next;
        true
    }
}
