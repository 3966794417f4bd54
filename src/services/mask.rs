use crate::config::HoleWinding;
use crate::constants::{MASK_LAT_LIMIT, MASK_LNG_LIMIT};
use crate::models::{GeoCoordinate, Ring, Winding};
use serde::Serialize;

/// Polygon-with-hole that covers the world except the spotlighted region.
/// The renderer fills `outer` minus `hole`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotlightMask {
    pub outer: Ring,
    pub hole: Ring,
}

/// World rectangle, clockwise from the north-west corner.
pub fn world_ring() -> Ring {
    Ring::new(vec![
        GeoCoordinate::from_raw(MASK_LAT_LIMIT, -MASK_LNG_LIMIT),
        GeoCoordinate::from_raw(MASK_LAT_LIMIT, MASK_LNG_LIMIT),
        GeoCoordinate::from_raw(-MASK_LAT_LIMIT, MASK_LNG_LIMIT),
        GeoCoordinate::from_raw(-MASK_LAT_LIMIT, -MASK_LNG_LIMIT),
    ])
}

/// Mask with `target` as the hole, passed through as decoded.
/// A degenerate target gives an empty hole, i.e. a full-world cover.
pub fn build_spotlight_mask(target: &Ring) -> SpotlightMask {
    let hole = if target.is_degenerate() {
        Ring::empty()
    } else {
        target.clone()
    };

    SpotlightMask {
        outer: world_ring(),
        hole,
    }
}

/// Builds spotlight masks with an explicit hole orientation step.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskCompositor {
    hole_winding: HoleWinding,
}

impl MaskCompositor {
    pub fn new(hole_winding: HoleWinding) -> Self {
        Self { hole_winding }
    }

    pub fn compose(&self, target: &Ring) -> SpotlightMask {
        let mut mask = build_spotlight_mask(target);
        mask.hole = match self.hole_winding {
            HoleWinding::Preserve => mask.hole,
            HoleWinding::CounterClockwise => mask.hole.with_winding(Winding::CounterClockwise),
            HoleWinding::Clockwise => mask.hole.with_winding(Winding::Clockwise),
        };
        mask
    }

    /// Mask for a set of display rings; only the principal ring is cut out.
    pub fn compose_rings(&self, rings: &[Ring]) -> SpotlightMask {
        match rings.first() {
            Some(ring) => self.compose(ring),
            None => self.compose(&Ring::empty()),
        }
    }
}
