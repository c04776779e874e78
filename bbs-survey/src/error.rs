//! Error types for the BBS survey tables

use thiserror::Error;

/// Errors that can occur while reading survey CSV tables or settings.
#[derive(Error, Debug)]
pub enum SurveyError {
    /// The underlying CSV reader failed (bad quoting, missing header, I/O).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field was present but could not be parsed as the expected type.
    #[error("invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// An identifier field was empty after trimming.
    #[error("empty identifier in {field}")]
    EmptyKey { field: &'static str },

    /// A visualization setting is out of its usable range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub(crate) fn parse_year(field: &'static str, value: &str) -> Result<i32, SurveyError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid(field, value))
}

pub(crate) fn parse_count(field: &'static str, value: &str) -> Result<u32, SurveyError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid(field, value))
}

/// Parse a float, rejecting NaN and infinities so they never reach a scale.
pub(crate) fn parse_float(field: &'static str, value: &str) -> Result<f64, SurveyError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(field, value)),
    }
}

fn invalid(field: &'static str, value: &str) -> SurveyError {
    SurveyError::InvalidField {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_rejects_nan() {
        assert!(parse_float("Latitude", "NaN").is_err());
        assert!(parse_float("Latitude", "inf").is_err());
        assert_eq!(parse_float("Latitude", " 38.5 ").unwrap(), 38.5);
    }

    #[test]
    fn test_parse_count_rejects_negative() {
        assert!(parse_count("SpeciesTotal", "-4").is_err());
        assert_eq!(parse_count("SpeciesTotal", "12").unwrap(), 12);
    }

    #[test]
    fn test_csv_error_keeps_source() {
        use std::error::Error;
        let csv_data = "Year,Aou\n1990,6140,12\n";
        let err: SurveyError = csv::ReaderBuilder::new()
            .from_reader(csv_data.as_bytes())
            .records()
            .find_map(|r| r.err())
            .unwrap()
            .into();
        assert!(err.to_string().starts_with("CSV error:"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_names_field() {
        let err = parse_year("Year", "19x0").unwrap_err();
        assert_eq!(err.to_string(), "invalid value for Year: \"19x0\"");
    }
}
