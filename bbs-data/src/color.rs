//! Per-route color scales for the route map.
//!
//! Each route gets a two-stop scale over its own padded historical extent, so a
//! point's color says how this year compares with that route's history rather
//! than with other routes.

use crate::{aggregate::RouteExtent, aggregate::SurveyIndex, config::ColorScaleConfig};
use bbs_survey::{error::SurveyError, route::RouteKey};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Channel-wise linear interpolation, `t` clamped to `[0, 1]`.
    pub fn interpolate(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)).round() as u8;
        Rgb(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = SurveyError;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SurveyError::InvalidField {
            field: "color",
            value: s.to_string(),
        };
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// How counts are positioned between the two domain bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
}

/// Two-stop clamped scale from a route's padded max (`from`) to padded min (`to`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub hi: f64,
    pub lo: f64,
    pub kind: ScaleKind,
    pub from: Rgb,
    pub to: Rgb,
}

/// Smallest log domain bound; counts of zero would otherwise be undefined.
const LOG_FLOOR: f64 = 1.0;

impl ColorScale {
    /// Build a scale over `extent`, padding the max up and the min down.
    ///
    /// Padding factors below 1 can push the padded max under the padded min;
    /// the bounds are re-ordered so `hi >= lo` always holds.
    pub fn for_extent(extent: RouteExtent, config: &ColorScaleConfig, from: Rgb, to: Rgb) -> Self {
        let padded_max = extent.max as f64 * config.upper_pad;
        let padded_min = extent.min as f64 * config.lower_pad;
        let (mut hi, mut lo) = if padded_max >= padded_min {
            (padded_max, padded_min)
        } else {
            (padded_min, padded_max)
        };
        if config.kind == ScaleKind::Log {
            hi = hi.max(LOG_FLOOR);
            lo = lo.max(LOG_FLOOR);
        }
        ColorScale {
            hi,
            lo,
            kind: config.kind,
            from,
            to,
        }
    }

    /// Position of `value` in `[0, 1]`: 0 at `hi`, 1 at `lo`.
    ///
    /// A degenerate domain (`hi == lo`) maps everything to the midpoint.
    pub fn normalize(&self, value: f64) -> f64 {
        let (hi, lo, v) = match self.kind {
            ScaleKind::Linear => (self.hi, self.lo, value),
            ScaleKind::Log => (
                self.hi.ln(),
                self.lo.ln(),
                value.max(LOG_FLOOR).ln(),
            ),
        };
        let width = hi - lo;
        if width == 0.0 || !width.is_finite() {
            return 0.5;
        }
        ((hi - v) / width).clamp(0.0, 1.0)
    }

    pub fn color(&self, species_total: u32) -> Rgb {
        self.from
            .interpolate(self.to, self.normalize(species_total as f64))
    }
}

/// A gradient stop for the map legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset_percent: f64,
    pub color: String,
}

/// Legend stops: stop `i` of `n` sits at `(i + 0.8) / n * 100` percent.
pub fn legend_stops(colors: &[Rgb]) -> Vec<GradientStop> {
    let n = colors.len() as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| GradientStop {
            offset_percent: (i as f64 + 0.8) / n * 100.0,
            color: c.to_hex(),
        })
        .collect()
}

/// Color scales for every route that has observations.
#[derive(Debug, Clone)]
pub struct ColorScales {
    scales: HashMap<RouteKey, ColorScale>,
    from: Rgb,
    to: Rgb,
}

impl ColorScales {
    pub fn build(index: &SurveyIndex, config: &ColorScaleConfig) -> Result<Self, SurveyError> {
        let (from, to) = config.endpoints()?;
        let scales = index
            .extents()
            .map(|(key, extent)| {
                (
                    key.clone(),
                    ColorScale::for_extent(*extent, config, from, to),
                )
            })
            .collect();
        Ok(ColorScales { scales, from, to })
    }

    pub fn get(&self, key: &RouteKey) -> Option<&ColorScale> {
        self.scales.get(key)
    }

    pub fn color_for(&self, key: &RouteKey, species_total: u32) -> Option<Rgb> {
        self.get(key).map(|scale| scale.color(species_total))
    }

    pub fn legend(&self) -> Vec<GradientStop> {
        legend_stops(&[self.from, self.to])
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb(0x90, 0xee, 0x90);
    const RED: Rgb = Rgb(0xff, 0x00, 0x00);

    fn extent(min: u32, max: u32) -> RouteExtent {
        RouteExtent { min, max }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#90ee90".parse::<Rgb>().unwrap(), GREEN);
        assert_eq!("ff0000".parse::<Rgb>().unwrap(), RED);
        assert!("#fff".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
        assert_eq!(GREEN.to_hex(), "#90ee90");
    }

    #[test]
    fn test_signed_channels_rejected() {
        assert!("#+1+1+1".parse::<Rgb>().is_err());
        assert!("-1ff00".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_linear_scale_endpoints_and_midpoint() {
        let scale = ColorScale::for_extent(extent(30, 80), &ColorScaleConfig::default(), GREEN, RED);
        assert!((scale.hi - 96.0).abs() < 1e-9);
        assert!((scale.lo - 24.0).abs() < 1e-9);
        assert_eq!(scale.color(96), GREEN);
        assert_eq!(scale.color(24), RED);
        assert_eq!(scale.color(60).to_hex(), "#c87748");
    }

    #[test]
    fn test_scale_clamps_outside_domain() {
        let scale = ColorScale::for_extent(extent(30, 80), &ColorScaleConfig::default(), GREEN, RED);
        assert_eq!(scale.color(1_000), GREEN);
        assert_eq!(scale.color(0), RED);
    }

    #[test]
    fn test_inverted_padding_is_reordered() {
        // The early [max * 0.8, min * 1.2] padding collapses narrow extents.
        let config = ColorScaleConfig {
            upper_pad: 0.8,
            lower_pad: 1.2,
            ..ColorScaleConfig::default()
        };
        let scale = ColorScale::for_extent(extent(100, 110), &config, GREEN, RED);
        assert!(scale.hi >= scale.lo);
        assert!((scale.hi - 120.0).abs() < 1e-9);
        assert!((scale.lo - 88.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_domain_is_midpoint() {
        let scale = ColorScale::for_extent(extent(0, 0), &ColorScaleConfig::default(), GREEN, RED);
        assert_eq!(scale.normalize(0.0), 0.5);
        assert_eq!(scale.color(0), GREEN.interpolate(RED, 0.5));
    }

    #[test]
    fn test_log_scale() {
        let config = ColorScaleConfig {
            kind: ScaleKind::Log,
            ..ColorScaleConfig::default()
        };
        let scale = ColorScale::for_extent(extent(30, 80), &config, GREEN, RED);
        assert!((scale.normalize(48.0) - 0.5).abs() < 1e-9);
        assert_eq!(scale.normalize(96.0), 0.0);
        assert_eq!(scale.normalize(0.0), 1.0);
    }

    #[test]
    fn test_log_scale_floors_zero_extent() {
        let config = ColorScaleConfig {
            kind: ScaleKind::Log,
            ..ColorScaleConfig::default()
        };
        let scale = ColorScale::for_extent(extent(0, 10), &config, GREEN, RED);
        assert_eq!(scale.lo, 1.0);
        assert!(scale.normalize(5.0).is_finite());
    }

    #[test]
    fn test_legend_stops() {
        let stops = legend_stops(&[GREEN, RED]);
        assert_eq!(stops.len(), 2);
        assert!((stops[0].offset_percent - 40.0).abs() < 1e-9);
        assert!((stops[1].offset_percent - 90.0).abs() < 1e-9);
        assert_eq!(stops[1].color, "#ff0000");
    }
}
