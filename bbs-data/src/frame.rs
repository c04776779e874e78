//! Everything the rendering surface needs to draw one year.

use crate::{
    color::GradientStop,
    dataset::Dataset,
    series::{SpeciesChart, TotalsChart},
};
use bbs_survey::route::RouteKey;
use log::warn;
use serde::Serialize;

/// One route drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub key: RouteKey,
    pub latitude: f64,
    pub longitude: f64,
    pub species_total: u32,
    pub color: String,
}

/// Pre-aggregated drawing data for a single displayed year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// The cleaned year actually displayed.
    pub year: i32,
    /// No observations exist for `year`; draw the empty state.
    pub empty: bool,
    pub points: Vec<MapPoint>,
    pub legend: Vec<GradientStop>,
    pub totals: TotalsChart,
    pub species: SpeciesChart,
}

impl Dataset {
    /// Build the frame for `requested_year` after clamping and gap substitution.
    pub fn frame(&self, requested_year: i32) -> Frame {
        let year = self.bounds().clean_year(requested_year);
        let lookup = self.index.observations_for(year);
        if lookup.is_empty() {
            warn!("no route observations for {}", year);
        }

        let points = lookup
            .observations()
            .iter()
            .filter_map(|obs| {
                let route = self.index.route(&obs.key)?;
                let color = match self.scales.color_for(&obs.key, obs.species_total) {
                    Some(c) => c,
                    None => {
                        warn!("no color scale for {}", obs.key);
                        return None;
                    }
                };
                Some(MapPoint {
                    key: obs.key.clone(),
                    latitude: route.latitude,
                    longitude: route.longitude,
                    species_total: obs.species_total,
                    color: color.to_hex(),
                })
            })
            .collect();

        let totals = TotalsChart::build(&self.totals, self.bounds(), year);
        let species = SpeciesChart::build(&self.species, totals.axis.clone(), self.bounds(), year);

        Frame {
            year,
            empty: lookup.is_empty(),
            points,
            legend: self.scales.legend(),
            totals,
            species,
        }
    }
}
