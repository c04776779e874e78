use crate::{
    error::{parse_count, parse_year, SurveyError},
    route::RouteKey,
    years::HasYear,
};
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

/// Birds counted on one route in one survey year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub key: RouteKey,
    pub species_total: u32,
}

#[derive(Debug, Deserialize)]
struct ObservationRow {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Route")]
    route: String,
    #[serde(rename = "SpeciesTotal")]
    species_total: String,
}

impl TryFrom<ObservationRow> for Observation {
    type Error = SurveyError;

    fn try_from(row: ObservationRow) -> Result<Self, Self::Error> {
        Ok(Observation {
            year: parse_year("Year", &row.year)?,
            key: RouteKey::parse(&row.state, &row.route)?,
            species_total: parse_count("SpeciesTotal", &row.species_total)?,
        })
    }
}

impl HasYear for Observation {
    fn year(&self) -> i32 {
        self.year
    }
}

impl Observation {
    /// Parse the per-route-per-year table (`Year,State,Route,SpeciesTotal`).
    ///
    /// Rows keep their source order.
    pub fn parse_observation_csv(csv_object: &str) -> Result<Vec<Observation>, SurveyError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut observations = Vec::new();
        for row in rdr.deserialize::<ObservationRow>() {
            observations.push(row?.try_into()?);
        }
        log::debug!("parsed {} route observations", observations.len());
        Ok(observations)
    }
}
