use crate::config::RingSelection;
use crate::models::{BoundaryGeometry, Ring};

/// Decides which outer rings of a decoded boundary are shown.
pub trait RingPolicy: Send + Sync {
    /// Rings to display, principal ring first. Empty when nothing usable.
    fn select(&self, geometry: &BoundaryGeometry) -> Vec<Ring>;
}

/// Keep only the part whose outer ring has the most points. Picks the
/// mainland of a country with islands or enclaves. Ties keep the first part.
pub struct LargestPart;

impl RingPolicy for LargestPart {
    fn select(&self, geometry: &BoundaryGeometry) -> Vec<Ring> {
        let mut best: Option<&Ring> = None;
        for ring in geometry.parts() {
            if best.map_or(true, |b| ring.len() > b.len()) {
                best = Some(ring);
            }
        }

        match best {
            Some(ring) if !ring.is_empty() => vec![ring.clone()],
            _ => Vec::new(),
        }
    }
}

/// Keep the first part in source order.
pub struct FirstPart;

impl RingPolicy for FirstPart {
    fn select(&self, geometry: &BoundaryGeometry) -> Vec<Ring> {
        geometry
            .parts()
            .first()
            .filter(|ring| !ring.is_empty())
            .cloned()
            .into_iter()
            .collect()
    }
}

/// Keep every non-empty part, largest first so `rings[0]` stays the
/// principal ring for centroid and mask purposes.
pub struct AllParts;

impl RingPolicy for AllParts {
    fn select(&self, geometry: &BoundaryGeometry) -> Vec<Ring> {
        let mut rings: Vec<Ring> = geometry
            .parts()
            .iter()
            .filter(|ring| !ring.is_empty())
            .cloned()
            .collect();
        // Stable: equal-sized parts keep source order
        rings.sort_by(|a, b| b.len().cmp(&a.len()));
        rings
    }
}

pub fn policy_for(selection: RingSelection) -> Box<dyn RingPolicy> {
    match selection {
        RingSelection::Largest => Box::new(LargestPart),
        RingSelection::First => Box::new(FirstPart),
        RingSelection::All => Box::new(AllParts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoCoordinate;

    fn ring(n: usize, tag: f64) -> Ring {
        Ring::new(
            (0..n)
                .map(|i| GeoCoordinate::from_raw(tag, i as f64))
                .collect(),
        )
    }

    fn multi(sizes: &[usize]) -> BoundaryGeometry {
        BoundaryGeometry::MultiPolygon(
            sizes
                .iter()
                .enumerate()
                .map(|(i, &n)| ring(n, i as f64))
                .collect(),
        )
    }

    #[test]
    fn largest_part_picks_most_detailed_ring() {
        let selected = LargestPart.select(&multi(&[3, 10, 5]));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].len(), 10);
    }

    #[test]
    fn largest_part_tie_keeps_first() {
        let selected = LargestPart.select(&multi(&[4, 7, 7]));
        assert_eq!(selected[0].points()[0].lat, 1.0);
    }

    #[test]
    fn largest_part_of_polygon_is_itself() {
        let geometry = BoundaryGeometry::Polygon(ring(4, 0.0));
        assert_eq!(LargestPart.select(&geometry), vec![ring(4, 0.0)]);
    }

    #[test]
    fn empty_geometry_selects_nothing() {
        assert!(LargestPart.select(&BoundaryGeometry::Empty).is_empty());
        assert!(FirstPart.select(&BoundaryGeometry::Empty).is_empty());
        assert!(AllParts.select(&BoundaryGeometry::Empty).is_empty());
        assert!(LargestPart.select(&multi(&[0, 0])).is_empty());
    }

    #[test]
    fn first_part_uses_source_order() {
        let selected = FirstPart.select(&multi(&[3, 10, 5]));
        assert_eq!(selected[0].len(), 3);
    }

    #[test]
    fn all_parts_sorted_largest_first() {
        let selected = AllParts.select(&multi(&[3, 10, 0, 5]));
        let sizes: Vec<usize> = selected.iter().map(Ring::len).collect();
        assert_eq!(sizes, vec![10, 5, 3]);
    }

    #[test]
    fn policy_for_maps_selection() {
        let geometry = multi(&[3, 10, 5]);
        assert_eq!(policy_for(RingSelection::Largest).select(&geometry)[0].len(), 10);
        assert_eq!(policy_for(RingSelection::First).select(&geometry)[0].len(), 3);
        assert_eq!(policy_for(RingSelection::All).select(&geometry).len(), 3);
    }
}
