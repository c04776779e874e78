use crate::{
    error::{parse_count, parse_float, parse_year, SurveyError},
    years::HasYear,
};
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

/// Continent-wide totals for one survey year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyTotal {
    pub year: i32,
    /// Birds counted across all routes
    pub species_total: u32,
    /// Mean birds counted per surveyed route
    pub average_per_route: f64,
}

#[derive(Debug, Deserialize)]
struct YearlyTotalRow {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "SpeciesTotal")]
    species_total: String,
    #[serde(rename = "AveragePerRoute")]
    average_per_route: String,
}

impl TryFrom<YearlyTotalRow> for YearlyTotal {
    type Error = SurveyError;

    fn try_from(row: YearlyTotalRow) -> Result<Self, Self::Error> {
        Ok(YearlyTotal {
            year: parse_year("Year", &row.year)?,
            species_total: parse_count("SpeciesTotal", &row.species_total)?,
            average_per_route: parse_float("AveragePerRoute", &row.average_per_route)?,
        })
    }
}

impl HasYear for YearlyTotal {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearlyTotal {
    /// Parse the yearly totals table (`Year,SpeciesTotal,AveragePerRoute`).
    pub fn parse_yearly_csv(csv_object: &str) -> Result<Vec<YearlyTotal>, SurveyError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut totals = Vec::new();
        for row in rdr.deserialize::<YearlyTotalRow>() {
            totals.push(row?.try_into()?);
        }
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::YearlyTotal;

    #[test]
    fn test_parse_yearly_csv() {
        let totals =
            YearlyTotal::parse_yearly_csv(include_str!("../../fixtures/year.csv")).unwrap();
        assert_eq!(totals.len(), 6);
        assert_eq!(totals[1].year, 1980);
        assert_eq!(totals[1].species_total, 2_100_000);
        assert!((totals[1].average_per_route - 840.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_empty_csv() {
        let totals = YearlyTotal::parse_yearly_csv("Year,SpeciesTotal,AveragePerRoute\n").unwrap();
        assert!(totals.is_empty());
    }
}
