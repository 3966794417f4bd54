use crate::error::{AppError, Result};
use crate::models::BoundaryGeometry;
use crate::services::geojson_decoder::{decode_feature_collection, DecodedFeature};
use async_trait::async_trait;
use std::path::Path;

/// Where boundaries for named places come from.
#[async_trait]
pub trait BoundarySource: Send + Sync {
    /// Boundary for `name`. `Ok(BoundaryGeometry::Empty)` means the source
    /// answered but had nothing usable.
    async fn fetch_boundary(&self, name: &str) -> Result<BoundaryGeometry>;

    fn source_name(&self) -> &'static str;
}

/// Read and decode a local FeatureCollection file.
pub async fn load_feature_collection(path: impl AsRef<Path>) -> Result<Vec<DecodedFeature>> {
    let path = path.as_ref();
    tracing::info!("Loading boundary features from {}", path.display());

    let bytes = tokio::fs::read(path).await?;
    let features = decode_feature_collection(&bytes)?;

    tracing::info!(
        "Loaded {} boundary features from {}",
        features.len(),
        path.display()
    );
    Ok(features)
}

/// Boundaries served from a FeatureCollection held in memory.
pub struct FileBoundarySource {
    features: Vec<DecodedFeature>,
    region_key: String,
}

impl FileBoundarySource {
    pub fn new(features: Vec<DecodedFeature>, region_key: impl Into<String>) -> Self {
        FileBoundarySource {
            features,
            region_key: region_key.into(),
        }
    }

    pub async fn load(path: impl AsRef<Path>, region_key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(load_feature_collection(path).await?, region_key))
    }

    fn matches(&self, feature: &DecodedFeature, name: &str) -> bool {
        let name = name.trim();
        [feature.property_str("name"), feature.region_ref(&self.region_key)]
            .into_iter()
            .flatten()
            .any(|value| value.eq_ignore_ascii_case(name))
    }
}

#[async_trait]
impl BoundarySource for FileBoundarySource {
    async fn fetch_boundary(&self, name: &str) -> Result<BoundaryGeometry> {
        self.features
            .iter()
            .find(|feature| self.matches(feature, name))
            .map(|feature| feature.geometry.clone())
            .ok_or_else(|| AppError::NotFound(format!("No boundary feature named '{}'", name)))
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}
