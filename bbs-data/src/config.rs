//! Visualization settings, loadable from JSON.
//!
//! Every field has a default matching the published charts, so an empty
//! object (`{}`) is a valid configuration.

use crate::{
    color::{Rgb, ScaleKind},
    palette::ROUTE_COLORS,
    scroll::ScrollWindow,
};
use bbs_survey::{error::SurveyError, route::normalize_id, years::YearBounds};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// AOU codes of the species drawn on the species trend chart.
pub const WANTED_SPECIES: [&str; 10] = [
    "6140", "7190", "6882", "5300", "4200", "6810", "5738", "4590", "3050", "4330",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScaleConfig {
    /// Hex colors for the padded max and padded min of each route.
    pub colors: [String; 2],
    /// Factor applied to a route's observed max.
    pub upper_pad: f64,
    /// Factor applied to a route's observed min.
    pub lower_pad: f64,
    pub kind: ScaleKind,
}

impl Default for ColorScaleConfig {
    fn default() -> Self {
        ColorScaleConfig {
            colors: ROUTE_COLORS.map(String::from),
            upper_pad: 1.2,
            lower_pad: 0.8,
            kind: ScaleKind::Linear,
        }
    }
}

impl ColorScaleConfig {
    pub fn endpoints(&self) -> Result<(Rgb, Rgb), SurveyError> {
        Ok((self.colors[0].parse()?, self.colors[1].parse()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub years: YearBounds,
    pub scroll: ScrollWindow,
    pub color: ColorScaleConfig,
    pub wanted_species: Vec<String>,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        VisualizationConfig {
            years: YearBounds::default(),
            scroll: ScrollWindow::default(),
            color: ColorScaleConfig::default(),
            wanted_species: WANTED_SPECIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl VisualizationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject settings that would break clamping, the scroll mapping or the scales.
    pub fn validate(&self) -> Result<(), SurveyError> {
        let invalid = |msg: String| Err(SurveyError::InvalidConfig(msg));

        let years = &self.years;
        if years.min_year > years.max_year {
            return invalid(format!(
                "min_year {} is after max_year {}",
                years.min_year, years.max_year
            ));
        }
        if let Some(gap) = years.gap {
            if years.contains(gap.missing) && !years.contains(gap.substitute) {
                return invalid(format!(
                    "gap substitute {} is outside {}..={}",
                    gap.substitute, years.min_year, years.max_year
                ));
            }
        }

        let scroll = &self.scroll;
        if !(scroll.start.is_finite() && scroll.finish.is_finite()) {
            return invalid("scroll window bounds must be finite".to_string());
        }
        if scroll.start < 0.0 || scroll.finish > 1.0 || scroll.start >= scroll.finish {
            return invalid(format!(
                "scroll window [{}, {}) must satisfy 0 <= start < finish <= 1",
                scroll.start, scroll.finish
            ));
        }

        for (name, pad) in [
            ("upper_pad", self.color.upper_pad),
            ("lower_pad", self.color.lower_pad),
        ] {
            if !pad.is_finite() || pad <= 0.0 {
                return invalid(format!("{} must be a positive number, got {}", name, pad));
            }
        }
        self.color.endpoints()?;
        Ok(())
    }

    /// Wanted AOU codes, normalized the same way as the species table.
    pub fn wanted_species_set(&self) -> HashSet<String> {
        self.wanted_species.iter().map(|s| normalize_id(s)).collect()
    }
}
