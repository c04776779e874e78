//! Load report for a data directory.

use crate::load::{load_config, load_dataset};
use bbs_data::dataset::Dataset;
use log::info;

/// Human-readable lines describing what the aggregation kept and dropped.
pub fn summary_lines(dataset: &Dataset) -> Vec<String> {
    let bounds = dataset.bounds();
    let years: Vec<i32> = dataset.index.years().collect();
    let mut lines = vec![
        format!("years: {}..={}", bounds.min_year, bounds.max_year),
        format!(
            "years with route data: {} ({})",
            years.len(),
            match (years.first(), years.last()) {
                (Some(first), Some(last)) => format!("{}..={}", first, last),
                _ => "none".to_string(),
            }
        ),
        format!("routes: {}", dataset.index.route_count()),
        format!("route observations: {}", dataset.index.observation_count()),
        format!("color scales: {}", dataset.scales.len()),
        format!("yearly totals: {}", dataset.totals.len()),
        format!("wanted species rows: {}", dataset.species.len()),
        format!("out of range: {}", dataset.report.out_of_range),
        format!(
            "unresolved observations: {}",
            dataset.report.unresolved_observations
        ),
        format!("duplicate routes: {}", dataset.report.duplicate_routes),
    ];
    for key in &dataset.report.unresolved_routes {
        lines.push(format!("  unresolved route {}", key));
    }
    lines
}

pub async fn run_summary(data_dir: &str, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    let dataset = load_dataset(data_dir, &config).await?;
    for line in summary_lines(&dataset) {
        println!("{}", line);
    }
    info!("Summary complete for {}", data_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::summary_lines;
    use crate::load::load_dataset;
    use bbs_data::config::VisualizationConfig;

    #[tokio::test]
    async fn test_summary_lines() {
        let dataset = load_dataset("../fixtures", &VisualizationConfig::default())
            .await
            .unwrap();
        let lines = summary_lines(&dataset);
        assert_eq!(lines[0], "years: 1980..=2022");
        assert_eq!(lines[1], "years with route data: 5 (1980..=2022)");
        assert!(lines.contains(&"out of range: 1".to_string()));
        assert_eq!(lines.last().unwrap(), "  unresolved route 44/7");
    }
}
