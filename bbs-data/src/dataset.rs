//! The fully loaded, read-only dataset behind every frame.

use crate::{
    aggregate::{LoadReport, SurveyIndex},
    color::ColorScales,
    config::VisualizationConfig,
};
use bbs_survey::{
    error::SurveyError, observation::Observation, route::RouteInfo,
    species::SpeciesObservation, yearly_total::YearlyTotal, years::YearBounds,
};
use log::info;

#[derive(Debug, Clone)]
pub struct Dataset {
    pub index: SurveyIndex,
    pub scales: ColorScales,
    /// In-range yearly totals, source order.
    pub totals: Vec<YearlyTotal>,
    /// In-range observations of wanted species, source order.
    pub species: Vec<SpeciesObservation>,
    pub report: LoadReport,
    bounds: YearBounds,
}

impl Dataset {
    /// Aggregate the four parsed tables once.
    ///
    /// Fails only when the configured colors cannot be parsed.
    pub fn assemble(
        routes: Vec<RouteInfo>,
        observations: Vec<Observation>,
        mut totals: Vec<YearlyTotal>,
        mut species: Vec<SpeciesObservation>,
        config: &VisualizationConfig,
    ) -> Result<Self, SurveyError> {
        let bounds = config.years;
        let (index, report) = SurveyIndex::build(routes, observations, bounds);
        let scales = ColorScales::build(&index, &config.color)?;

        let dropped_totals = bounds.retain_in_range(&mut totals);
        let dropped_species = bounds.retain_in_range(&mut species);
        let wanted = config.wanted_species_set();
        species.retain(|s| wanted.contains(&s.aou));

        info!(
            "loaded {} routes, {} observations in {}..={} ({} skipped), {} color scales",
            index.route_count(),
            index.observation_count(),
            bounds.min_year,
            bounds.max_year,
            report.skipped(),
            scales.len()
        );
        info!(
            "loaded {} yearly totals ({} out of range), {} wanted species rows ({} out of range)",
            totals.len(),
            dropped_totals,
            species.len(),
            dropped_species
        );

        Ok(Dataset {
            index,
            scales,
            totals,
            species,
            report,
            bounds,
        })
    }

    pub fn bounds(&self) -> &YearBounds {
        &self.bounds
    }
}
