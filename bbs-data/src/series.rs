//! Line chart series revealed up to the current year.
//!
//! Both charts reveal one year past the displayed year, so the line reaches
//! the next point as the year advances.

use crate::palette::{species_stroke, AVERAGE_STROKE, TOTAL_STROKE};
use bbs_survey::{species::SpeciesObservation, yearly_total::YearlyTotal, years::YearBounds};
use bbs_utils::{
    dates::format_year_axis,
    extent::{extent, extent_i32},
};
use serde::Serialize;
use std::collections::HashMap;

/// Years revealed beyond the displayed year.
pub const REVEAL_LEAD: i32 = 1;

/// Time axis domain as "YYYY-MM-DD" dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAxis {
    pub start: String,
    pub end: String,
}

impl YearAxis {
    pub fn from_years<I: IntoIterator<Item = i32>>(years: I) -> Option<Self> {
        extent_i32(years).map(|(start, end)| YearAxis {
            start: format_year_axis(start),
            end: format_year_axis(end),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsPoint {
    pub year: i32,
    pub date: String,
    pub species_total: u32,
    pub average_per_route: f64,
}

/// Total birds (left axis) and average per route (right axis) by year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsChart {
    pub axis: Option<YearAxis>,
    pub count_extent: Option<(f64, f64)>,
    pub average_extent: Option<(f64, f64)>,
    pub total_stroke: &'static str,
    pub average_stroke: &'static str,
    pub points: Vec<TotalsPoint>,
}

impl TotalsChart {
    /// Axes span all of `totals`; points stop at `year + REVEAL_LEAD`.
    pub fn build(totals: &[YearlyTotal], bounds: &YearBounds, year: i32) -> Self {
        let points = bounds
            .truncate_through(totals, year + REVEAL_LEAD)
            .map(|t| TotalsPoint {
                year: t.year,
                date: format_year_axis(t.year),
                species_total: t.species_total,
                average_per_route: t.average_per_route,
            })
            .collect();
        TotalsChart {
            axis: YearAxis::from_years(totals.iter().map(|t| t.year)),
            count_extent: extent(totals.iter().map(|t| t.species_total as f64)),
            average_extent: extent(totals.iter().map(|t| t.average_per_route)),
            total_stroke: TOTAL_STROKE,
            average_stroke: AVERAGE_STROKE,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesPoint {
    pub year: i32,
    pub date: String,
    pub species_total: u32,
    /// Count as a fraction of this species' max over the revealed years.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesSeries {
    pub aou: String,
    pub stroke: &'static str,
    pub points: Vec<SpeciesPoint>,
}

/// One line per wanted species on a shared 0..1 axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesChart {
    pub axis: Option<YearAxis>,
    pub series: Vec<SpeciesSeries>,
}

impl SpeciesChart {
    /// Group revealed observations by AOU code in first-seen order.
    pub fn build(
        species: &[SpeciesObservation],
        axis: Option<YearAxis>,
        bounds: &YearBounds,
        year: i32,
    ) -> Self {
        let mut order: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<&SpeciesObservation>)> = Vec::new();
        for obs in bounds.truncate_through(species, year + REVEAL_LEAD) {
            let slot = *order.entry(obs.aou.as_str()).or_insert_with(|| {
                groups.push((obs.aou.as_str(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(obs);
        }

        let series = groups
            .into_iter()
            .enumerate()
            .map(|(i, (aou, observations))| {
                let max = observations
                    .iter()
                    .map(|o| o.species_total)
                    .max()
                    .unwrap_or(0);
                let points = observations
                    .iter()
                    .map(|o| SpeciesPoint {
                        year: o.year,
                        date: format_year_axis(o.year),
                        species_total: o.species_total,
                        fraction: if max == 0 {
                            0.0
                        } else {
                            o.species_total as f64 / max as f64
                        },
                    })
                    .collect();
                SpeciesSeries {
                    aou: aou.to_string(),
                    stroke: species_stroke(i),
                    points,
                }
            })
            .collect();

        SpeciesChart { axis, series }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(year: i32, species_total: u32, average: f64) -> YearlyTotal {
        YearlyTotal {
            year,
            species_total,
            average_per_route: average,
        }
    }

    fn species(year: i32, aou: &str, species_total: u32) -> SpeciesObservation {
        SpeciesObservation {
            year,
            aou: aou.to_string(),
            species_total,
        }
    }

    #[test]
    fn test_totals_reveal_one_year_ahead() {
        let totals = vec![
            total(1980, 100, 1.0),
            total(1981, 300, 3.0),
            total(1982, 200, 2.0),
            total(1983, 50, 0.5),
        ];
        let chart = TotalsChart::build(&totals, &YearBounds::default(), 1981);
        let years: Vec<i32> = chart.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1980, 1981, 1982]);
        assert_eq!(chart.count_extent, Some((50.0, 300.0)));
        assert_eq!(chart.average_extent, Some((0.5, 3.0)));
        assert_eq!(
            chart.axis,
            Some(YearAxis {
                start: "1980-01-01".to_string(),
                end: "1983-01-01".to_string(),
            })
        );
        assert_eq!(chart.points[0].date, "1980-01-01");
    }

    #[test]
    fn test_totals_empty() {
        let chart = TotalsChart::build(&[], &YearBounds::default(), 1990);
        assert!(chart.points.is_empty());
        assert_eq!(chart.axis, None);
        assert_eq!(chart.count_extent, None);
    }

    #[test]
    fn test_species_grouped_and_normalized() {
        let observations = vec![
            species(1980, "6140", 800),
            species(1980, "7190", 120),
            species(1981, "6140", 900),
            species(1981, "7190", 60),
            species(1990, "6140", 9_000),
        ];
        let chart = SpeciesChart::build(&observations, None, &YearBounds::default(), 1980);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].aou, "6140");
        assert_eq!(chart.series[0].stroke, "red");
        assert_eq!(chart.series[1].aou, "7190");
        assert_eq!(chart.series[1].stroke, "green");

        let fractions: Vec<f64> = chart.series[0].points.iter().map(|p| p.fraction).collect();
        assert_eq!(fractions.len(), 2);
        assert!((fractions[0] - 800.0 / 900.0).abs() < 1e-12);
        assert_eq!(fractions[1], 1.0);
        assert_eq!(chart.series[1].points[0].fraction, 1.0);
        assert_eq!(chart.series[1].points[1].fraction, 0.5);
    }

    #[test]
    fn test_species_zero_counts() {
        let observations = vec![species(1980, "4200", 0), species(1981, "4200", 0)];
        let chart = SpeciesChart::build(&observations, None, &YearBounds::default(), 1985);
        assert!(chart.series[0].points.iter().all(|p| p.fraction == 0.0));
    }
}
