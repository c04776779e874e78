use crate::{
    error::{parse_count, parse_year, SurveyError},
    route::normalize_key_field,
    years::HasYear,
};
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

/// Birds of one species (by AOU code) counted across all routes in one year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeciesObservation {
    pub year: i32,
    /// Normalized AOU species code, e.g. `"6140"`
    pub aou: String,
    pub species_total: u32,
}

#[derive(Debug, Deserialize)]
struct SpeciesRow {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Aou")]
    aou: String,
    #[serde(rename = "SpeciesTotal")]
    species_total: String,
}

impl TryFrom<SpeciesRow> for SpeciesObservation {
    type Error = SurveyError;

    fn try_from(row: SpeciesRow) -> Result<Self, Self::Error> {
        Ok(SpeciesObservation {
            year: parse_year("Year", &row.year)?,
            aou: normalize_key_field("Aou", &row.aou)?,
            species_total: parse_count("SpeciesTotal", &row.species_total)?,
        })
    }
}

impl HasYear for SpeciesObservation {
    fn year(&self) -> i32 {
        self.year
    }
}

impl SpeciesObservation {
    /// Parse the per-species table (`Year,Aou,SpeciesTotal`).
    pub fn parse_species_csv(csv_object: &str) -> Result<Vec<SpeciesObservation>, SurveyError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut species = Vec::new();
        for row in rdr.deserialize::<SpeciesRow>() {
            species.push(row?.try_into()?);
        }
        Ok(species)
    }
}
