use crate::constants::*;
use crate::models::GeoCoordinate;
use std::env;

/// How a region's representative point is derived from its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CentroidMethod {
    #[default]
    Mean, // Arithmetic mean of vertices, biased by vertex density
    AreaWeighted, // Planar polygon centroid
}

impl std::str::FromStr for CentroidMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(CentroidMethod::Mean),
            "area" | "area_weighted" => Ok(CentroidMethod::AreaWeighted),
            _ => Err(format!(
                "Invalid centroid strategy: {}. Use 'mean' or 'area'",
                s
            )),
        }
    }
}

/// Which parts of a multi-part boundary are kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RingSelection {
    #[default]
    Largest, // Part with the most outer-ring points
    First,
    All,
}

impl std::str::FromStr for RingSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "largest" => Ok(RingSelection::Largest),
            "first" => Ok(RingSelection::First),
            "all" => Ok(RingSelection::All),
            _ => Err(format!(
                "Invalid ring policy: {}. Use 'largest', 'first' or 'all'",
                s
            )),
        }
    }
}

/// Orientation applied to a spotlight hole before it is cut out of the
/// (clockwise) world rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoleWinding {
    Preserve,
    #[default]
    CounterClockwise,
    Clockwise,
}

impl std::str::FromStr for HoleWinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(HoleWinding::Preserve),
            "ccw" | "counterclockwise" => Ok(HoleWinding::CounterClockwise),
            "cw" | "clockwise" => Ok(HoleWinding::Clockwise),
            _ => Err(format!(
                "Invalid mask hole winding: {}. Use 'preserve', 'ccw' or 'cw'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON catalog of regions and their points of interest
    pub region_seeds_path: String,
    /// Optional FeatureCollection attached in the background at startup
    pub boundary_file: Option<String>,
    /// Feature property that names the region a boundary belongs to
    pub boundary_region_key: String,
    pub nominatim_base_url: String,
    pub nominatim_user_agent: String,
    pub boundary_cache_ttl: u64,
    pub boundary_cache_max_entries: u64,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Centroid for regions without a boundary and without a seed fallback
    pub fallback_centroid: GeoCoordinate,

    /// Centroid strategy used when a boundary is attached
    pub centroid_method: CentroidMethod,

    /// Multi-part boundary handling
    pub ring_selection: RingSelection,

    /// Orientation of spotlight mask holes
    pub hole_winding: HoleWinding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_centroid: GeoCoordinate::from_raw(
                DEFAULT_FALLBACK_CENTROID_LAT,
                DEFAULT_FALLBACK_CENTROID_LNG,
            ),
            centroid_method: CentroidMethod::default(),
            ring_selection: RingSelection::default(),
            hole_winding: HoleWinding::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let lat: f64 = env::var("FALLBACK_CENTROID_LAT")
            .unwrap_or_else(|_| defaults.fallback_centroid.lat.to_string())
            .parse()
            .map_err(|_| "Invalid FALLBACK_CENTROID_LAT")?;
        let lng: f64 = env::var("FALLBACK_CENTROID_LNG")
            .unwrap_or_else(|_| defaults.fallback_centroid.lng.to_string())
            .parse()
            .map_err(|_| "Invalid FALLBACK_CENTROID_LNG")?;

        Ok(Self {
            fallback_centroid: GeoCoordinate::new(lat, lng)?,

            centroid_method: env::var("CENTROID_STRATEGY")
                .unwrap_or_else(|_| "mean".to_string())
                .parse()?,

            ring_selection: env::var("RING_POLICY")
                .unwrap_or_else(|_| "largest".to_string())
                .parse()?,

            hole_winding: env::var("MASK_HOLE_WINDING")
                .unwrap_or_else(|_| "ccw".to_string())
                .parse()?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            region_seeds_path: env::var("REGION_SEEDS_PATH")
                .unwrap_or_else(|_| DEFAULT_REGION_SEEDS_PATH.to_string()),
            boundary_file: env::var("BOUNDARY_FILE").ok().filter(|p| !p.is_empty()),
            boundary_region_key: env::var("BOUNDARY_REGION_KEY")
                .unwrap_or_else(|_| DEFAULT_BOUNDARY_REGION_KEY.to_string()),
            nominatim_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_BASE_URL.to_string()),
            nominatim_user_agent: env::var("NOMINATIM_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_USER_AGENT.to_string()),
            boundary_cache_ttl: env::var("BOUNDARY_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_BOUNDARY_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid BOUNDARY_CACHE_TTL")?,
            boundary_cache_max_entries: env::var("BOUNDARY_CACHE_MAX_ENTRIES")
                .unwrap_or_else(|_| DEFAULT_BOUNDARY_CACHE_MAX_ENTRIES.to_string())
                .parse()
                .map_err(|_| "Invalid BOUNDARY_CACHE_MAX_ENTRIES")?,
            engine: EngineConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENGINE_VARS: [&str; 5] = [
        "FALLBACK_CENTROID_LAT",
        "FALLBACK_CENTROID_LNG",
        "CENTROID_STRATEGY",
        "RING_POLICY",
        "MASK_HOLE_WINDING",
    ];

    fn clear_engine_vars() {
        for var in ENGINE_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("MEAN".parse::<CentroidMethod>().unwrap(), CentroidMethod::Mean);
        assert_eq!(
            "area".parse::<CentroidMethod>().unwrap(),
            CentroidMethod::AreaWeighted
        );
        assert!("median".parse::<CentroidMethod>().is_err());

        assert_eq!("All".parse::<RingSelection>().unwrap(), RingSelection::All);
        assert!("biggest".parse::<RingSelection>().is_err());

        assert_eq!("cw".parse::<HoleWinding>().unwrap(), HoleWinding::Clockwise);
        assert_eq!(
            "preserve".parse::<HoleWinding>().unwrap(),
            HoleWinding::Preserve
        );
        assert!("left".parse::<HoleWinding>().is_err());
    }

    #[test]
    #[serial]
    fn test_engine_config_defaults() {
        clear_engine_vars();
        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.fallback_centroid, GeoCoordinate::from_raw(31.0, 36.0));
        assert_eq!(config.centroid_method, CentroidMethod::Mean);
        assert_eq!(config.ring_selection, RingSelection::Largest);
        assert_eq!(config.hole_winding, HoleWinding::CounterClockwise);
    }

    #[test]
    #[serial]
    fn test_engine_config_overrides() {
        clear_engine_vars();
        env::set_var("FALLBACK_CENTROID_LAT", "30.5");
        env::set_var("CENTROID_STRATEGY", "area");
        env::set_var("RING_POLICY", "all");
        let config = EngineConfig::from_env();
        clear_engine_vars();

        let config = config.unwrap();
        assert_eq!(config.fallback_centroid.lat, 30.5);
        assert_eq!(config.centroid_method, CentroidMethod::AreaWeighted);
        assert_eq!(config.ring_selection, RingSelection::All);
    }

    #[test]
    #[serial]
    fn test_engine_config_rejects_bad_values() {
        clear_engine_vars();
        env::set_var("FALLBACK_CENTROID_LAT", "north");
        assert!(EngineConfig::from_env().is_err());

        env::set_var("FALLBACK_CENTROID_LAT", "95.0");
        assert!(EngineConfig::from_env().is_err());
        clear_engine_vars();
    }
}
