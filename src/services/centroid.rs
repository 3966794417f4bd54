use crate::config::CentroidMethod;
use crate::models::{GeoCoordinate, Ring};
use geo::{Centroid, Polygon};

/// Trait for region centroid strategies
pub trait CentroidStrategy: Send + Sync {
    /// Representative point of `ring`. `None` for an empty ring.
    fn centroid(&self, ring: &Ring) -> Option<GeoCoordinate>;
}

/// Arithmetic mean of the ring's vertices.
///
/// Cheap and good enough for roughly convex administrative shapes, but
/// pulled toward densely digitized stretches of border. A closing vertex
/// that repeats the first point is counted twice.
pub struct MeanCentroid;

impl CentroidStrategy for MeanCentroid {
    fn centroid(&self, ring: &Ring) -> Option<GeoCoordinate> {
        if ring.is_empty() {
            return None;
        }

        let n = ring.len() as f64;
        let (lat_sum, lng_sum) = ring
            .points()
            .iter()
            .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));

        Some(GeoCoordinate::from_raw(lat_sum / n, lng_sum / n))
    }
}

/// Planar area-weighted polygon centroid in degree space.
/// Zero-area rings fall back to the vertex mean.
pub struct AreaWeightedCentroid;

impl CentroidStrategy for AreaWeightedCentroid {
    fn centroid(&self, ring: &Ring) -> Option<GeoCoordinate> {
        if ring.is_degenerate() || ring.signed_area() == 0.0 {
            return MeanCentroid.centroid(ring);
        }

        let polygon = Polygon::new(ring.to_line_string(), vec![]);

        polygon
            .centroid()
            .map(|point| GeoCoordinate::from_raw(point.y(), point.x()))
            .or_else(|| MeanCentroid.centroid(ring))
    }
}

pub fn strategy_for(method: CentroidMethod) -> Box<dyn CentroidStrategy> {
    match method {
        CentroidMethod::Mean => Box::new(MeanCentroid),
        CentroidMethod::AreaWeighted => Box::new(AreaWeightedCentroid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Ring {
        Ring::new(
            points
                .iter()
                .map(|&(lat, lng)| GeoCoordinate::from_raw(lat, lng))
                .collect(),
        )
    }

    #[test]
    fn mean_centroid_of_square() {
        let square = ring(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]);
        assert_eq!(
            MeanCentroid.centroid(&square),
            Some(GeoCoordinate::from_raw(1.0, 1.0))
        );
    }

    #[test]
    fn mean_centroid_of_empty_ring() {
        assert_eq!(MeanCentroid.centroid(&Ring::empty()), None);
        assert_eq!(AreaWeightedCentroid.centroid(&Ring::empty()), None);
    }

    #[test]
    fn mean_centroid_is_biased_by_vertex_density() {
        // Extra vertices along the bottom edge drag the mean south
        let dense = ring(&[
            (0.0, 0.0),
            (0.0, 0.5),
            (0.0, 1.0),
            (0.0, 1.5),
            (0.0, 2.0),
            (2.0, 2.0),
            (2.0, 0.0),
        ]);
        let mean = MeanCentroid.centroid(&dense).unwrap();
        let area = AreaWeightedCentroid.centroid(&dense).unwrap();
        assert!(mean.lat < 1.0);
        assert!((area.lat - 1.0).abs() < 1e-9);
        assert!((area.lng - 1.0).abs() < 1e-9);
    }

    #[test]
    fn area_weighted_matches_for_closed_ring() {
        let closed = ring(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)]);
        let c = AreaWeightedCentroid.centroid(&closed).unwrap();
        assert!((c.lat - 2.0).abs() < 1e-9);
        assert!((c.lng - 2.0).abs() < 1e-9);
    }

    #[test]
    fn area_weighted_falls_back_for_collinear_ring() {
        let line = ring(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(
            AreaWeightedCentroid.centroid(&line),
            Some(GeoCoordinate::from_raw(1.0, 1.0))
        );
    }

    #[test]
    fn strategy_for_maps_method() {
        let square = ring(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]);
        for method in [CentroidMethod::Mean, CentroidMethod::AreaWeighted] {
            let c = strategy_for(method).centroid(&square).unwrap();
            assert!((c.lat - 1.0).abs() < 1e-9 && (c.lng - 1.0).abs() < 1e-9);
        }
    }
}
