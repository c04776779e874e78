//! Scroll position to year commands.

use crate::load::load_config;
use anyhow::Context;
use bbs_data::scroll::{scroll_progress, year_for_scroll_progress, ScrollWindow, YearDriver};
use bbs_survey::years::YearBounds;
use log::info;

/// Feed `steps + 1` evenly spaced progress values through a [`YearDriver`],
/// keeping only those that change the displayed year.
pub fn sweep(window: ScrollWindow, bounds: YearBounds, steps: u32) -> Vec<(f64, i32)> {
    let steps = steps.max(1);
    let mut driver = YearDriver::new(window, bounds);
    (0..=steps)
        .filter_map(|i| {
            let progress = i as f64 / steps as f64;
            driver.on_scroll(progress).map(|year| (progress, year))
        })
        .collect()
}

pub async fn run_year(
    progress: Option<f64>,
    offset: Option<f64>,
    viewport: Option<f64>,
    total: Option<f64>,
    config_path: Option<&str>,
) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    let progress = match (progress, offset, viewport, total) {
        (Some(p), _, _, _) => p,
        (None, Some(o), Some(v), Some(t)) => scroll_progress(o, v, t),
        _ => anyhow::bail!("Pass --progress or all of --offset, --viewport and --total"),
    };
    let year = config.years.clean_year(year_for_scroll_progress(
        progress,
        config.scroll.start,
        config.scroll.finish,
        config.years.min_year,
        config.years.max_year,
    ));
    println!("{}", year);
    Ok(())
}

pub async fn run_timeline(
    steps: u32,
    config_path: Option<&str>,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    let changes = sweep(config.scroll, config.years, steps);

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["progress", "year"])?;
    for (progress, year) in &changes {
        wtr.write_record([format!("{:.4}", progress), year.to_string()])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush timeline CSV: {}", e))?;
    let body = String::from_utf8(bytes)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, body)
                .await
                .with_context(|| format!("Failed to write timeline to {}", path))?;
            info!("{} redraws written to {}", changes.len(), path);
        }
        None => print!("{}", body),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::sweep;
    use bbs_data::scroll::ScrollWindow;
    use bbs_survey::years::YearBounds;

    #[test]
    fn test_sweep_only_emits_changes() {
        let changes = sweep(ScrollWindow::default(), YearBounds::default(), 400);
        assert_eq!(changes.first().map(|c| c.1), Some(1980));
        assert_eq!(changes.last().map(|c| c.1), Some(2022));
        for pair in changes.windows(2) {
            assert!(pair[1].1 > pair[0].1);
        }
        // The gap year is never drawn.
        assert!(changes.iter().all(|(_, year)| *year != 2020));
    }

    #[test]
    fn test_sweep_coarse_steps() {
        let changes = sweep(ScrollWindow::default(), YearBounds::default(), 4);
        let years: Vec<i32> = changes.iter().map(|c| c.1).collect();
        assert_eq!(years, vec![1980, 2022]);
    }
}
