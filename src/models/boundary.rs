use crate::models::Ring;
use serde::Serialize;

/// Decoded administrative boundary, outer rings only.
///
/// Interior holes are dropped at decode time. Choosing which parts of a
/// `MultiPolygon` to render is left to a [`RingPolicy`](crate::services::ring_policy::RingPolicy).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", content = "rings")]
pub enum BoundaryGeometry {
    /// Unsupported type, malformed input, or no data
    #[default]
    Empty,
    Polygon(Ring),
    /// One outer ring per part, in source order
    MultiPolygon(Vec<Ring>),
}

impl BoundaryGeometry {
    pub fn is_empty(&self) -> bool {
        match self {
            BoundaryGeometry::Empty => true,
            BoundaryGeometry::Polygon(ring) => ring.is_empty(),
            BoundaryGeometry::MultiPolygon(parts) => parts.iter().all(Ring::is_empty),
        }
    }

    /// Outer rings of every part, in source order.
    pub fn parts(&self) -> &[Ring] {
        match self {
            BoundaryGeometry::Empty => &[],
            BoundaryGeometry::Polygon(ring) => std::slice::from_ref(ring),
            BoundaryGeometry::MultiPolygon(parts) => parts,
        }
    }

    pub fn part_count(&self) -> usize {
        self.parts().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoCoordinate;

    fn ring(n: usize) -> Ring {
        Ring::new(
            (0..n)
                .map(|i| GeoCoordinate::from_raw(i as f64, 0.0))
                .collect(),
        )
    }

    #[test]
    fn empty_variants() {
        assert!(BoundaryGeometry::Empty.is_empty());
        assert!(BoundaryGeometry::Polygon(Ring::empty()).is_empty());
        assert!(BoundaryGeometry::MultiPolygon(vec![]).is_empty());
        assert!(!BoundaryGeometry::Polygon(ring(3)).is_empty());
    }

    #[test]
    fn parts_in_source_order() {
        let geometry = BoundaryGeometry::MultiPolygon(vec![ring(3), ring(5)]);
        let sizes: Vec<usize> = geometry.parts().iter().map(Ring::len).collect();
        assert_eq!(sizes, vec![3, 5]);
        assert_eq!(BoundaryGeometry::Polygon(ring(4)).part_count(), 1);
        assert_eq!(BoundaryGeometry::Empty.part_count(), 0);
    }
}
