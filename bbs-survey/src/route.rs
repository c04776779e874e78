use crate::error::{parse_float, SurveyError};
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strip surrounding whitespace and leading zero padding from an identifier.
///
/// Source tables reference the same route both as `"007"` and `"7"`, so every
/// state, route and AOU identifier goes through here before it is used as a key.
/// An identifier made only of zeros normalizes to `"0"`.
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.trim_start_matches('0');
    if stripped.is_empty() && !trimmed.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Normalize an identifier, failing when nothing is left to key on.
pub(crate) fn normalize_key_field(
    field: &'static str,
    raw: &str,
) -> Result<String, SurveyError> {
    let id = normalize_id(raw);
    if id.is_empty() {
        return Err(SurveyError::EmptyKey { field });
    }
    Ok(id)
}

/// Identity of a survey route: state number plus route number, both normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteKey {
    pub state_id: String,
    pub route_id: String,
}

impl RouteKey {
    /// Build a key from raw (possibly zero padded) identifiers.
    pub fn new(state_id: &str, route_id: &str) -> Self {
        RouteKey {
            state_id: normalize_id(state_id),
            route_id: normalize_id(route_id),
        }
    }

    pub(crate) fn parse(state_id: &str, route_id: &str) -> Result<Self, SurveyError> {
        Ok(RouteKey {
            state_id: normalize_key_field("State", state_id)?,
            route_id: normalize_key_field("Route", route_id)?,
        })
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.state_id, self.route_id)
    }
}

/// Static location metadata for a survey route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub key: RouteKey,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RouteRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Route")]
    route: String,
    #[serde(rename = "Latitude")]
    latitude: String,
    #[serde(rename = "Longitude")]
    longitude: String,
}

impl TryFrom<RouteRow> for RouteInfo {
    type Error = SurveyError;

    fn try_from(row: RouteRow) -> Result<Self, Self::Error> {
        Ok(RouteInfo {
            key: RouteKey::parse(&row.state, &row.route)?,
            latitude: parse_float("Latitude", &row.latitude)?,
            longitude: parse_float("Longitude", &row.longitude)?,
        })
    }
}

impl RouteInfo {
    /// Parse the route metadata table.
    ///
    /// Expected headers include `State,Route,Latitude,Longitude`; any other
    /// columns (route name, stratum, ...) are ignored.
    pub fn parse_route_csv(csv_object: &str) -> Result<Vec<RouteInfo>, SurveyError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut routes = Vec::new();
        for row in rdr.deserialize::<RouteRow>() {
            routes.push(row?.try_into()?);
        }
        log::debug!("parsed {} routes", routes.len());
        Ok(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE_CSV: &str = include_str!("../../fixtures/route.csv");

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("007"), "7");
        assert_eq!(normalize_id("7"), "7");
        assert_eq!(normalize_id(" 0120 "), "120");
        assert_eq!(normalize_id("000"), "0");
        assert_eq!(normalize_id(""), "");
    }

    #[test]
    fn test_padded_and_unpadded_keys_match() {
        assert_eq!(RouteKey::new("06", "007"), RouteKey::new("6", "7"));
    }

    #[test]
    fn test_parse_route_csv() {
        let routes = RouteInfo::parse_route_csv(ROUTE_CSV).unwrap();
        assert_eq!(routes.len(), 5);
        assert_eq!(routes[0].key, RouteKey::new("2", "1"));
        assert!((routes[2].latitude - 38.5816).abs() < f64::EPSILON);
        assert!((routes[2].longitude - (-121.4944)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_route_csv_bad_latitude() {
        let csv_data = "State,Route,Latitude,Longitude\n02,001,north,-87.6\n";
        let err = RouteInfo::parse_route_csv(csv_data).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::InvalidField { field: "Latitude", .. }
        ));
    }

    #[test]
    fn test_parse_route_csv_empty_key() {
        let csv_data = "State,Route,Latitude,Longitude\n,001,34.8,-87.6\n";
        let err = RouteInfo::parse_route_csv(csv_data).unwrap_err();
        assert!(matches!(err, SurveyError::EmptyKey { field: "State" }));
    }
}
