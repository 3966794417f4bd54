//! GeoJSON boundary decoding.
//!
//! Only `Polygon` and `MultiPolygon` geometries carry boundaries. Everything
//! else, including malformed coordinate arrays, decodes to
//! [`BoundaryGeometry::Empty`] so that one bad feature never blocks the rest
//! of a file. Inside a `MultiPolygon` only the unreadable parts are dropped. GeoJSON stores positions as `[lng, lat]`; the swap to
//! [`GeoCoordinate`] happens here and nowhere else.

use crate::error::{AppError, Result};
use crate::models::{BoundaryGeometry, GeoCoordinate, Ring};
use crate::services::ring_policy::{LargestPart, RingPolicy};
use geojson::{Geometry, Value};
use serde_json::{json, Map, Value as JsonValue};
use std::collections::BTreeMap;

/// One feature of a decoded FeatureCollection.
#[derive(Debug, Clone)]
pub struct DecodedFeature {
    /// Position in the source `features` array
    pub index: usize,
    /// Top-level feature `id`, if any
    pub feature_id: Option<String>,
    pub properties: Map<String, JsonValue>,
    pub geometry: BoundaryGeometry,
}

impl DecodedFeature {
    /// String or numeric property rendered as a string.
    pub fn property_str(&self, key: &str) -> Option<String> {
        json_scalar_to_string(self.properties.get(key)?)
    }

    /// Region this feature points at: the `key` property, else the
    /// top-level feature `id`.
    pub fn region_ref(&self, key: &str) -> Option<String> {
        self.property_str(key).or_else(|| self.feature_id.clone())
    }
}

/// Decode a geometry given its GeoJSON `type` and `coordinates` member,
/// keeping the single most detailed outer ring.
pub fn decode_geometry(geometry_type: &str, coordinates: &JsonValue) -> Vec<Ring> {
    LargestPart.select(&decode_boundary(geometry_type, coordinates))
}

/// Decode a geometry into its tagged form, outer rings only.
pub fn decode_boundary(geometry_type: &str, coordinates: &JsonValue) -> BoundaryGeometry {
    match geometry_type {
        "Polygon" => match decode_polygon(coordinates) {
            Some(ring) => BoundaryGeometry::Polygon(ring),
            None => BoundaryGeometry::Empty,
        },
        "MultiPolygon" => decode_multipolygon(coordinates),
        other => {
            tracing::debug!("Ignoring unsupported geometry type: {}", other);
            BoundaryGeometry::Empty
        }
    }
}

/// Decode a GeoJSON geometry object (`{"type": .., "coordinates": ..}`).
pub fn decode_geometry_object(geometry: &JsonValue) -> BoundaryGeometry {
    let Some(geometry_type) = geometry.get("type").and_then(JsonValue::as_str) else {
        tracing::warn!("Geometry object without a type");
        return BoundaryGeometry::Empty;
    };
    let Some(coordinates) = geometry.get("coordinates") else {
        tracing::warn!("{} geometry without coordinates", geometry_type);
        return BoundaryGeometry::Empty;
    };
    decode_boundary(geometry_type, coordinates)
}

/// Decode every feature of a FeatureCollection, preserving feature order.
///
/// Fails only when the document itself is unusable (not JSON, or no
/// `features` array). Individual bad features decode to `Empty`.
pub fn decode_feature_collection(json: &[u8]) -> Result<Vec<DecodedFeature>> {
    let root: JsonValue = serde_json::from_slice(json)
        .map_err(|e| AppError::InvalidGeoJson(format!("not a JSON document: {}", e)))?;

    let features = root
        .get("features")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| AppError::InvalidGeoJson("missing features array".to_string()))?;

    let decoded: Vec<DecodedFeature> = features
        .iter()
        .enumerate()
        .map(|(index, feature)| decode_feature(index, feature))
        .collect();

    let empty = decoded.iter().filter(|f| f.geometry.is_empty()).count();
    if empty > 0 {
        tracing::warn!(
            "{} of {} features decoded without a usable boundary",
            empty,
            decoded.len()
        );
    }
    tracing::debug!("Decoded {} boundary features", decoded.len());

    Ok(decoded)
}

/// Apply a ring policy to decoded features, giving the positional
/// `feature index -> rings` map. Features with nothing to show are omitted.
pub fn feature_rings(
    features: &[DecodedFeature],
    policy: &dyn RingPolicy,
) -> BTreeMap<usize, Vec<Ring>> {
    features
        .iter()
        .filter_map(|feature| {
            let rings = policy.select(&feature.geometry);
            (!rings.is_empty()).then_some((feature.index, rings))
        })
        .collect()
}

/// Decode a FeatureCollection straight to the positional
/// `feature index -> rings` map, keeping the largest part of each feature.
pub fn decode_feature_rings(json: &[u8]) -> Result<BTreeMap<usize, Vec<Ring>>> {
    Ok(feature_rings(&decode_feature_collection(json)?, &LargestPart))
}

fn decode_feature(index: usize, feature: &JsonValue) -> DecodedFeature {
    let properties = feature
        .get("properties")
        .and_then(JsonValue::as_object)
        .cloned()
        .unwrap_or_default();

    let geometry = match feature.get("geometry") {
        Some(geometry) if geometry.is_object() => decode_geometry_object(geometry),
        _ => {
            tracing::warn!("Feature {} has no geometry", index);
            BoundaryGeometry::Empty
        }
    };

    DecodedFeature {
        index,
        feature_id: feature.get("id").and_then(json_scalar_to_string),
        properties,
        geometry,
    }
}

/// Outer ring of one polygon's coordinates. Holes are not rendered.
fn decode_polygon(coordinates: &JsonValue) -> Option<Ring> {
    let object = json!({ "type": "Polygon", "coordinates": coordinates });
    match Geometry::from_json_value(object) {
        Ok(geometry) => match geometry.value {
            Value::Polygon(rings) => rings.first().and_then(|outer| decode_ring(outer)),
            _ => None,
        },
        Err(e) => {
            tracing::warn!("Malformed Polygon coordinates: {}", e);
            None
        }
    }
}

fn decode_multipolygon(coordinates: &JsonValue) -> BoundaryGeometry {
    let Some(polygons) = coordinates.as_array() else {
        tracing::warn!("Malformed MultiPolygon coordinates: expected an array of polygons");
        return BoundaryGeometry::Empty;
    };

    let mut parts = Vec::with_capacity(polygons.len());
    for (i, polygon) in polygons.iter().enumerate() {
        match decode_polygon(polygon) {
            Some(ring) => parts.push(ring),
            None => tracing::warn!("Skipping unreadable MultiPolygon part {}", i),
        }
    }

    if parts.is_empty() {
        BoundaryGeometry::Empty
    } else {
        BoundaryGeometry::MultiPolygon(parts)
    }
}

/// `[lng, lat]` positions to a ring. `None` if any position is short.
fn decode_ring(positions: &[Vec<f64>]) -> Option<Ring> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [lng, lat, ..] => Some(GeoCoordinate::from_raw(*lat, *lng)),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .map(Ring::new)
}

fn json_scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_swaps_axis_order() {
        let coords = json!([[[35.9, 31.9], [36.1, 31.9], [36.1, 32.1], [35.9, 31.9]]]);
        let rings = decode_geometry("Polygon", &coords);
        assert_eq!(rings.len(), 1);
        let first = rings[0].points()[0];
        assert_eq!(first.lat, 31.9);
        assert_eq!(first.lng, 35.9);
    }

    #[test]
    fn axis_order_invariant_for_every_position() {
        let pairs = [(-180.0, -90.0), (0.0, 0.0), (35.5, 29.25), (179.75, 89.5)];
        let ring: Vec<JsonValue> = pairs.iter().map(|(x, y)| json!([x, y])).collect();
        let rings = decode_geometry("Polygon", &json!([ring]));

        for ((x, y), point) in pairs.iter().zip(rings[0].points()) {
            assert_eq!(point.lat, *y);
            assert_eq!(point.lng, *x);
        }
    }

    #[test]
    fn polygon_ignores_holes() {
        let coords = json!([
            [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
            [[2.0, 2.0], [3.0, 2.0], [3.0, 3.0]]
        ]);
        let geometry = decode_boundary("Polygon", &coords);
        match geometry {
            BoundaryGeometry::Polygon(ring) => assert_eq!(ring.len(), 4),
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn multipolygon_selects_largest_outer_ring() {
        let part = |n: usize| {
            let ring: Vec<JsonValue> = (0..n).map(|i| json!([i as f64, 1.0])).collect();
            json!([ring])
        };
        let coords = JsonValue::Array(vec![part(3), part(10), part(5)]);

        let rings = decode_geometry("MultiPolygon", &coords);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 10);

        match decode_boundary("MultiPolygon", &coords) {
            BoundaryGeometry::MultiPolygon(parts) => {
                let sizes: Vec<usize> = parts.iter().map(Ring::len).collect();
                assert_eq!(sizes, vec![3, 10, 5]);
            }
            other => panic!("expected multipolygon, got {other:?}"),
        }
    }

    #[test]
    fn multipolygon_drops_only_unreadable_parts() {
        let coords = json!([
            [[[35.0, 29.0], [35.1, 29.0], [35.1, 29.1]]],
            [[["x", 29.0], [35.1, 29.0], [35.1, 29.1]]],
            [[[35.0], [36.0, 32.0], [37.0, 33.0]]],
            [],
            [[[34.0, 28.0], [34.5, 28.0], [34.5, 28.5], [34.0, 28.5]]]
        ]);

        match decode_boundary("MultiPolygon", &coords) {
            BoundaryGeometry::MultiPolygon(parts) => {
                let sizes: Vec<usize> = parts.iter().map(Ring::len).collect();
                assert_eq!(sizes, vec![3, 4]);
                assert_eq!(parts[1].points()[0], GeoCoordinate::from_raw(28.0, 34.0));
            }
            other => panic!("expected multipolygon, got {other:?}"),
        }
        assert_eq!(decode_geometry("MultiPolygon", &coords)[0].len(), 4);
    }

    #[test]
    fn multipolygon_without_readable_parts_is_empty() {
        let coords = json!([[[["x", 1.0]]], [], [[[35.0]]]]);
        assert_eq!(decode_boundary("MultiPolygon", &coords), BoundaryGeometry::Empty);
        assert_eq!(decode_boundary("MultiPolygon", &json!([])), BoundaryGeometry::Empty);
    }

    #[test]
    fn unsupported_types_are_empty() {
        assert!(decode_geometry("Point", &json!([35.0, 31.0])).is_empty());
        assert!(decode_geometry("LineString", &json!([[35.0, 31.0], [36.0, 32.0]])).is_empty());
        assert_eq!(
            decode_boundary("GeometryCollection", &json!([])),
            BoundaryGeometry::Empty
        );
    }

    #[test]
    fn malformed_coordinates_are_empty() {
        // Wrong nesting depth
        assert!(decode_geometry("Polygon", &json!([[35.0, 31.0], [36.0, 32.0]])).is_empty());
        // Non-numeric value
        assert!(decode_geometry("Polygon", &json!([[["a", 31.0], [36.0, 32.0]]])).is_empty());
        // Short position
        assert!(decode_geometry("Polygon", &json!([[[35.0], [36.0, 32.0], [37.0, 33.0]]])).is_empty());
        // Not an array at all
        assert!(decode_geometry("MultiPolygon", &json!("nope")).is_empty());
        // Empty polygon
        assert!(decode_geometry("Polygon", &json!([])).is_empty());
    }

    #[test]
    fn extra_position_members_are_ignored() {
        let coords = json!([[[35.0, 31.0, 800.0], [36.0, 31.0, 810.0], [36.0, 32.0, 790.0]]]);
        let rings = decode_geometry("Polygon", &coords);
        assert_eq!(rings[0].points()[2], GeoCoordinate::from_raw(32.0, 36.0));
    }

    #[test]
    fn geometry_object_decoding() {
        let object = json!({"type": "Polygon", "coordinates": [[[1.0, 2.0], [3.0, 2.0], [3.0, 4.0]]]});
        assert_eq!(decode_geometry_object(&object).part_count(), 1);
        assert!(decode_geometry_object(&json!({"coordinates": []})).is_empty());
        assert!(decode_geometry_object(&json!({"type": "Polygon"})).is_empty());
    }

    #[test]
    fn feature_collection_preserves_order_and_isolates_bad_features() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"region_id": "0", "name": "Amman"},
                 "geometry": {"type": "Polygon", "coordinates": [[[35.8, 31.8], [36.2, 31.8], [36.2, 32.1]]]}},
                {"type": "Feature", "properties": {"region_id": 1},
                 "geometry": {"type": "Polygon", "coordinates": [[["x", 1.0]]]}},
                {"type": "Feature", "properties": null, "geometry": null},
                {"type": "Feature", "id": 7, "properties": {},
                 "geometry": {"type": "MultiPolygon", "coordinates": [[[[35.0, 29.5], [35.1, 29.5], [35.1, 29.6]]]]}}
            ]
        });
        let bytes = serde_json::to_vec(&doc).unwrap();
        let features = decode_feature_collection(&bytes).unwrap();

        assert_eq!(features.len(), 4);
        assert_eq!(features[0].index, 0);
        assert_eq!(features[0].property_str("region_id").as_deref(), Some("0"));
        assert_eq!(features[1].property_str("region_id").as_deref(), Some("1"));
        assert!(!features[0].geometry.is_empty());
        assert!(features[1].geometry.is_empty());
        assert!(features[2].geometry.is_empty());
        assert_eq!(features[3].feature_id.as_deref(), Some("7"));
        assert_eq!(features[3].region_ref("region_id").as_deref(), Some("7"));
        assert_eq!(features[2].region_ref("region_id"), None);

        let rings = feature_rings(&features, &LargestPart);
        assert_eq!(rings.keys().copied().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(rings[&3][0].points()[0], GeoCoordinate::from_raw(29.5, 35.0));
    }

    #[test]
    fn region_property_wins_over_feature_id() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "gov-9", "properties": {"region_id": 4}, "geometry": null}
            ]
        });
        let features = decode_feature_collection(&serde_json::to_vec(&doc).unwrap()).unwrap();
        assert_eq!(features[0].region_ref("region_id").as_deref(), Some("4"));
        assert_eq!(features[0].region_ref("code").as_deref(), Some("gov-9"));
    }

    #[test]
    fn unusable_documents_are_errors() {
        assert!(matches!(
            decode_feature_collection(b"not json"),
            Err(AppError::InvalidGeoJson(_))
        ));
        assert!(matches!(
            decode_feature_collection(br#"{"type": "FeatureCollection"}"#),
            Err(AppError::InvalidGeoJson(_))
        ));
    }
}
