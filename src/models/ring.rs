use crate::models::GeoCoordinate;
use geo::algorithm::winding_order::{Winding as _, WindingOrder};
use geo::{Area, Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Orientation of a ring, with longitude as x and latitude as y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Fewer than 3 points, or zero area
    Degenerate,
}

/// An ordered polygon boundary. May be open or closed (first == last).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<GeoCoordinate>);

impl Ring {
    pub fn new(points: Vec<GeoCoordinate>) -> Self {
        Ring(points)
    }

    pub fn empty() -> Self {
        Ring(Vec::new())
    }

    pub fn points(&self) -> &[GeoCoordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rings with fewer than 3 points cannot enclose anything.
    pub fn is_degenerate(&self) -> bool {
        self.0.len() < 3
    }

    /// Closed geo line string with longitude as x and latitude as y.
    pub fn to_line_string(&self) -> LineString<f64> {
        let mut line: LineString<f64> = self
            .0
            .iter()
            .map(|p| Coord { x: p.lng, y: p.lat })
            .collect::<Vec<_>>()
            .into();
        line.close();
        line
    }

    /// Signed area in square degrees, positive for counter-clockwise rings.
    /// Open and closed rings give the same result.
    pub fn signed_area(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        Polygon::new(self.to_line_string(), vec![]).signed_area()
    }

    pub fn winding(&self) -> Winding {
        if self.is_degenerate() {
            return Winding::Degenerate;
        }
        match self.to_line_string().winding_order() {
            Some(WindingOrder::CounterClockwise) => Winding::CounterClockwise,
            Some(WindingOrder::Clockwise) => Winding::Clockwise,
            None => Winding::Degenerate,
        }
    }

    /// Return this ring oriented as `target`, keeping it open or closed as
    /// it was. Degenerate rings and a `Degenerate` target leave the ring as is.
    pub fn with_winding(self, target: Winding) -> Self {
        let current = self.winding();
        if current == Winding::Degenerate || target == Winding::Degenerate || current == target {
            return self;
        }
        let mut points = self.0;
        points.reverse();
        Ring(points)
    }
}

impl From<Vec<GeoCoordinate>> for Ring {
    fn from(points: Vec<GeoCoordinate>) -> Self {
        Ring(points)
    }
}
