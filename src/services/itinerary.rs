use crate::models::{haversine_distance_km, DistanceKm, GeoCoordinate, PointOfInterest};
use serde::Serialize;

/// One stop of a planned visit, in visiting order.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryStop {
    /// 1-based position in the plan
    pub order: usize,
    pub poi: PointOfInterest,
    /// Great-circle distance from the start, not from the previous stop
    pub distance_km: DistanceKm,
}

/// Order candidates by distance from `start`, nearest first.
///
/// Every candidate is ranked independently by its distance from the start;
/// leg lengths between stops are not considered. Ties keep input order.
pub fn plan_itinerary(start: &GeoCoordinate, candidates: &[PointOfInterest]) -> Vec<PointOfInterest> {
    plan_itinerary_stops(start, candidates)
        .into_iter()
        .map(|stop| stop.poi)
        .collect()
}

/// Same ordering as [`plan_itinerary`], with distances for display.
pub fn plan_itinerary_stops(start: &GeoCoordinate, candidates: &[PointOfInterest]) -> Vec<ItineraryStop> {
    let mut ranked: Vec<(DistanceKm, &PointOfInterest)> = candidates
        .iter()
        .map(|poi| {
            (
                DistanceKm::from_raw(haversine_distance_km(start, &poi.coordinate)),
                poi,
            )
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (distance_km, poi))| ItineraryStop {
            order: i + 1,
            poi: poi.clone(),
            distance_km,
        })
        .collect()
}

/// Points of interest picked for a trip, in the order they were picked.
#[derive(Debug, Clone, Default)]
pub struct TripSelection {
    ids: Vec<String>,
}

impl TripSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection from a list of ids, dropping repeats.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for id in ids {
            let id = id.into();
            if !selection.contains(&id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// Add `id` if absent, remove it if present. Returns true if now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Look up every selected id with `lookup`. Returns the resolved points
    /// in selection order, or the ids that could not be found.
    pub fn resolve<F>(&self, lookup: F) -> Result<Vec<PointOfInterest>, Vec<String>>
    where
        F: Fn(&str) -> Option<PointOfInterest>,
    {
        let mut found = Vec::with_capacity(self.ids.len());
        let mut missing = Vec::new();
        for id in &self.ids {
            match lookup(id) {
                Some(poi) => found.push(poi),
                None => missing.push(id.clone()),
            }
        }

        if missing.is_empty() {
            Ok(found)
        } else {
            Err(missing)
        }
    }
}
