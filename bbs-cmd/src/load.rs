//! Reading the survey tables and config from disk.
//!
//! Files are read one after another before any frame is built.

use anyhow::Context;
use bbs_data::{config::VisualizationConfig, dataset::Dataset};
use bbs_survey::{
    observation::Observation, route::RouteInfo, species::SpeciesObservation,
    yearly_total::YearlyTotal,
};
use log::info;
use std::path::Path;

pub const ROUTE_CSV: &str = "route.csv";
pub const YEAR_ROUTE_CSV: &str = "year_route.csv";
pub const YEAR_CSV: &str = "year.csv";
pub const YEAR_SPECIES_CSV: &str = "year_species.csv";

/// Load the JSON config at `path`, or the defaults when no path is given.
pub async fn load_config(path: Option<&str>) -> anyhow::Result<VisualizationConfig> {
    match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read config file: {}", path))?;
            let config = VisualizationConfig::from_json_str(&json)
                .with_context(|| format!("Failed to parse config file: {}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {}", path))?;
            info!("Loaded config from {}", path);
            Ok(config)
        }
        None => Ok(VisualizationConfig::default()),
    }
}

async fn read_table(data_dir: &Path, name: &str) -> anyhow::Result<String> {
    let path = data_dir.join(name);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and aggregate the four survey tables found in `data_dir`.
pub async fn load_dataset(
    data_dir: &str,
    config: &VisualizationConfig,
) -> anyhow::Result<Dataset> {
    let dir = Path::new(data_dir);
    info!("Loading survey tables from {}", dir.display());

    let routes = RouteInfo::parse_route_csv(&read_table(dir, ROUTE_CSV).await?)
        .with_context(|| format!("Failed to parse {}", ROUTE_CSV))?;
    let observations = Observation::parse_observation_csv(&read_table(dir, YEAR_ROUTE_CSV).await?)
        .with_context(|| format!("Failed to parse {}", YEAR_ROUTE_CSV))?;
    let totals = YearlyTotal::parse_yearly_csv(&read_table(dir, YEAR_CSV).await?)
        .with_context(|| format!("Failed to parse {}", YEAR_CSV))?;
    let species = SpeciesObservation::parse_species_csv(&read_table(dir, YEAR_SPECIES_CSV).await?)
        .with_context(|| format!("Failed to parse {}", YEAR_SPECIES_CSV))?;

    let dataset = Dataset::assemble(routes, observations, totals, species, config)
        .context("Failed to build color scales")?;
    Ok(dataset)
}
