//! Stable engine-wide constants.
//!
//! Values here are structural invariants, formula coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! Runtime-tunable knobs live in [`EngineConfig`](crate::config::EngineConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

/// Default location of the static region/POI catalog.
pub const DEFAULT_REGION_SEEDS_PATH: &str = "data/regions.json";
/// Feature property that carries the region id in boundary files.
pub const DEFAULT_BOUNDARY_REGION_KEY: &str = "region_id";

// --- Geodesy ---

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Region defaults ---

/// Centroid used for regions whose boundary has not been attached yet.
pub const DEFAULT_FALLBACK_CENTROID_LAT: f64 = 31.0;
/// See [`DEFAULT_FALLBACK_CENTROID_LAT`].
pub const DEFAULT_FALLBACK_CENTROID_LNG: f64 = 36.0;
/// Camera zoom used when a region seed does not specify one.
pub const DEFAULT_REGION_ZOOM: f32 = 10.0;

/// Region fill palette (RGB). Regions take `PALETTE[index % PALETTE.len()]`.
pub const REGION_PALETTE: [u32; 12] = [
    0xE57373, 0xBA68C8, 0x64B5F6, 0x4DB6AC, 0xFFF176, 0xFFB74D, 0xA1887F, 0x90A4AE, 0xF06292,
    0x7986CB, 0x4DD0E1, 0x81C784,
];

// --- Spotlight mask ---

/// Latitude of the mask's outer rectangle. Kept inside ±90 so renderers
/// do not collapse the poles.
pub const MASK_LAT_LIMIT: f64 = 85.0;
/// Longitude of the mask's outer rectangle.
pub const MASK_LNG_LIMIT: f64 = 180.0;

// --- Boundary service ---

/// Public Nominatim endpoint used for country boundary lookups.
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Nominatim's usage policy requires an identifying User-Agent.
pub const DEFAULT_NOMINATIM_USER_AGENT: &str = "regionmap/0.1";
/// Boundary simplification tolerance (degrees) requested from Nominatim.
pub const NOMINATIM_POLYGON_THRESHOLD: f64 = 0.005;
/// Per-request timeout for boundary lookups.
pub const NOMINATIM_TIMEOUT_SECONDS: u64 = 20;
/// Retries after the first attempt (2 = 3 total attempts).
pub const NOMINATIM_MAX_RETRIES: usize = 2;
/// Base delay for exponential backoff between attempts.
pub const NOMINATIM_BACKOFF_BASE_MS: u64 = 1000;
/// Upper bound for a single backoff delay.
pub const NOMINATIM_MAX_BACKOFF_MS: u64 = 60_000;

// --- Boundary cache defaults (used when env vars are absent) ---

/// Default boundary cache TTL: 7 days. Overridden by `BOUNDARY_CACHE_TTL`.
pub const DEFAULT_BOUNDARY_CACHE_TTL_SECONDS: u64 = 604_800;
/// Maximum cached boundaries. Overridden by `BOUNDARY_CACHE_MAX_ENTRIES`.
pub const DEFAULT_BOUNDARY_CACHE_MAX_ENTRIES: u64 = 256;
