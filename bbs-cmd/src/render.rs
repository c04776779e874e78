//! JSON frame export for a single year.

use crate::load::{load_config, load_dataset};
use anyhow::Context;
use log::info;

pub async fn run_frame(
    year: &str,
    data_dir: &str,
    config_path: Option<&str>,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    let requested = config
        .years
        .parse_slider_year(year)
        .with_context(|| format!("Invalid year: {}", year))?;
    let dataset = load_dataset(data_dir, &config).await?;
    let frame = dataset.frame(requested);
    let json = serde_json::to_string_pretty(&frame)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write frame to {}", path))?;
            info!(
                "Frame for {} ({} points) written to {}",
                frame.year,
                frame.points.len(),
                path
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
