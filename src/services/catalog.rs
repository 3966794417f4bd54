use crate::models::{haversine_distance_km, GeoCoordinate, PointOfInterest};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Distance,
    Rating,
    Popularity,
}

impl std::str::FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "distance" => Ok(SortOption::Distance),
            "rating" => Ok(SortOption::Rating),
            "popularity" | "visits" => Ok(SortOption::Popularity),
            _ => Err(format!(
                "Invalid sort option: {}. Use 'distance', 'rating' or 'popularity'",
                s
            )),
        }
    }
}

/// Filter and ordering for the points-of-interest list.
#[derive(Debug, Clone, Default)]
pub struct PoiQuery {
    /// Category label; `None`, empty, or "All" keeps everything
    pub category: Option<String>,
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    pub sort: SortOption,
    /// Reference point for distance sorting
    pub origin: Option<GeoCoordinate>,
}

impl PoiQuery {
    pub fn matches(&self, poi: &PointOfInterest) -> bool {
        if let Some(category) = &self.category {
            if !poi.matches_category(category) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => {
                poi.name.to_lowercase().contains(&text.to_lowercase())
            }
            _ => true,
        }
    }

    /// Apply the filter, then a stable sort. Distance sorting without an
    /// origin keeps catalog order.
    pub fn apply(&self, pois: &[PointOfInterest]) -> Vec<PointOfInterest> {
        let mut result: Vec<PointOfInterest> =
            pois.iter().filter(|p| self.matches(p)).cloned().collect();

        match (self.sort, self.origin) {
            (SortOption::Distance, Some(origin)) => result.sort_by(|a, b| {
                haversine_distance_km(&origin, &a.coordinate)
                    .total_cmp(&haversine_distance_km(&origin, &b.coordinate))
            }),
            (SortOption::Distance, None) => {}
            (SortOption::Rating, _) => result.sort_by(|a, b| descending(a.rating, b.rating)),
            (SortOption::Popularity, _) => result.sort_by(|a, b| b.popularity.cmp(&a.popularity)),
        }

        result
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
