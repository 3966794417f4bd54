pub mod boundary;
pub mod coordinates;
pub mod distance;
pub mod geo;
pub mod poi;
pub mod region;
pub mod ring;

pub use boundary::BoundaryGeometry;
pub use coordinates::{haversine_distance_km, GeoCoordinate};
pub use distance::DistanceKm;
pub use geo::BoundingBox;
pub use poi::{PoiSeed, PointOfInterest};
pub use region::{ColorIndex, Region, RegionSeed};
pub use ring::{Ring, Winding};
