//! One-pass aggregation of route observations into year and route lookups.

use bbs_survey::{
    observation::Observation,
    route::{RouteInfo, RouteKey},
    years::YearBounds,
};
use log::{debug, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Smallest and largest species total ever observed on one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteExtent {
    pub min: u32,
    pub max: u32,
}

impl RouteExtent {
    fn seed(value: u32) -> Self {
        RouteExtent {
            min: value,
            max: value,
        }
    }

    fn include(&mut self, value: u32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        debug_assert!(self.min <= self.max);
    }
}

/// Result of looking a year up in the index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YearLookup<'a> {
    Observations(&'a [Observation]),
    NoData,
}

impl<'a> YearLookup<'a> {
    pub fn observations(&self) -> &'a [Observation] {
        match *self {
            YearLookup::Observations(obs) => obs,
            YearLookup::NoData => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, YearLookup::NoData)
    }
}

/// What the aggregation dropped and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    /// Observations outside the configured year range.
    pub out_of_range: usize,
    /// Observations whose route has no metadata row.
    pub unresolved_observations: usize,
    /// Distinct route keys that could not be placed on the map.
    pub unresolved_routes: Vec<RouteKey>,
    /// Route metadata rows that replaced an earlier row with the same key.
    pub duplicate_routes: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.out_of_range + self.unresolved_observations
    }
}

/// Read-only lookups built once from the route and observation tables.
#[derive(Debug, Clone)]
pub struct SurveyIndex {
    routes: HashMap<RouteKey, RouteInfo>,
    by_year: BTreeMap<i32, Vec<Observation>>,
    extents: HashMap<RouteKey, RouteExtent>,
    bounds: YearBounds,
}

impl SurveyIndex {
    /// Aggregate observations in a single pass.
    ///
    /// Observations outside `bounds` are discarded first. Observations whose
    /// route key has no [`RouteInfo`] are skipped and reported, so every
    /// indexed observation can be placed. Within a year, source order is kept.
    pub fn build(
        routes: Vec<RouteInfo>,
        observations: Vec<Observation>,
        bounds: YearBounds,
    ) -> (Self, LoadReport) {
        let mut report = LoadReport::default();

        let mut route_map: HashMap<RouteKey, RouteInfo> = HashMap::with_capacity(routes.len());
        for route in routes {
            if route_map.insert(route.key.clone(), route).is_some() {
                report.duplicate_routes += 1;
            }
        }

        let mut by_year: BTreeMap<i32, Vec<Observation>> = BTreeMap::new();
        let mut extents: HashMap<RouteKey, RouteExtent> = HashMap::new();
        let mut unresolved: BTreeSet<RouteKey> = BTreeSet::new();

        for obs in observations {
            if !bounds.contains(obs.year) {
                report.out_of_range += 1;
                continue;
            }
            if !route_map.contains_key(&obs.key) {
                report.unresolved_observations += 1;
                unresolved.insert(obs.key.clone());
                continue;
            }
            extents
                .entry(obs.key.clone())
                .and_modify(|extent| extent.include(obs.species_total))
                .or_insert_with(|| RouteExtent::seed(obs.species_total));
            by_year.entry(obs.year).or_default().push(obs);
        }

        report.unresolved_routes = unresolved.into_iter().collect();
        for key in &report.unresolved_routes {
            warn!("no route metadata for {}, skipping its observations", key);
        }
        debug!(
            "indexed {} years, {} routes with observations, {} skipped",
            by_year.len(),
            extents.len(),
            report.skipped()
        );

        (
            SurveyIndex {
                routes: route_map,
                by_year,
                extents,
                bounds,
            },
            report,
        )
    }

    pub fn bounds(&self) -> &YearBounds {
        &self.bounds
    }

    /// Observations recorded in `year`, or [`YearLookup::NoData`].
    pub fn observations_for(&self, year: i32) -> YearLookup<'_> {
        match self.by_year.get(&year) {
            Some(obs) if !obs.is_empty() => YearLookup::Observations(obs),
            _ => YearLookup::NoData,
        }
    }

    pub fn route(&self, key: &RouteKey) -> Option<&RouteInfo> {
        self.routes.get(key)
    }

    pub fn extent(&self, key: &RouteKey) -> Option<RouteExtent> {
        self.extents.get(key).copied()
    }

    pub fn extents(&self) -> impl Iterator<Item = (&RouteKey, &RouteExtent)> {
        self.extents.iter()
    }

    /// Years that have at least one observation, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.by_year.keys().copied()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn observation_count(&self) -> usize {
        self.by_year.values().map(Vec::len).sum()
    }
}
