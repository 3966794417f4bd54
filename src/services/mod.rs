pub mod boundary_source;
pub mod catalog;
pub mod centroid;
pub mod geojson_decoder;
pub mod itinerary;
pub mod mask;
pub mod nominatim;
pub mod region_registry;
pub mod ring_policy;
