use crate::constants::REGION_PALETTE;
use crate::models::{BoundingBox, GeoCoordinate, PoiSeed, PointOfInterest, Ring};
use serde::{Deserialize, Serialize};

/// Position in the fixed region palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorIndex(usize);

impl ColorIndex {
    /// Color for the region at `position` in the registry.
    pub fn for_position(position: usize) -> Self {
        ColorIndex(position % REGION_PALETTE.len())
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn rgb(self) -> u32 {
        REGION_PALETTE[self.0 % REGION_PALETTE.len()]
    }

    /// `#RRGGBB` for the renderer
    pub fn hex(self) -> String {
        format!("#{:06X}", self.rgb())
    }
}

/// Static description of a region, as loaded from the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionSeed {
    /// Defaults to the seed's position in the catalog
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub default_zoom: Option<f32>,
    /// Centroid to show before a boundary is attached
    #[serde(default)]
    pub fallback_centroid: Option<GeoCoordinate>,
    #[serde(default)]
    pub points_of_interest: Vec<PoiSeed>,
}

/// An administrative region as displayed on the map.
///
/// Instances are immutable snapshots; attaching a boundary produces a new
/// `Region` through [`Region::with_geometry`].
#[derive(Debug, Clone, Serialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub description: String,
    pub events: Vec<String>,
    pub default_zoom: f32,
    pub boundary_rings: Vec<Ring>,
    pub centroid: GeoCoordinate,
    pub display_color: ColorIndex,
    pub points_of_interest: Vec<PointOfInterest>,
}

impl Region {
    pub fn has_boundary(&self) -> bool {
        self.boundary_rings
            .first()
            .is_some_and(|ring| !ring.is_degenerate())
    }

    /// Copy of this region with a new boundary and centroid. Color and
    /// points of interest carry over.
    pub fn with_geometry(&self, boundary_rings: Vec<Ring>, centroid: GeoCoordinate) -> Region {
        Region {
            boundary_rings,
            centroid,
            ..self.clone()
        }
    }

    /// Bounds of the first ring, used to fit the camera.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.boundary_rings
            .first()
            .and_then(|ring| BoundingBox::from_points(ring.points()))
    }

    pub fn find_poi(&self, id: &str) -> Option<&PointOfInterest> {
        self.points_of_interest.iter().find(|poi| poi.id == id)
    }
}
