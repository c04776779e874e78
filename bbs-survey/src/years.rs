use crate::error::{parse_year, SurveyError};
use serde::{Deserialize, Serialize};

/// First survey year shown by the visualization.
pub const MIN_YEAR: i32 = 1980;

/// Last survey year shown by the visualization.
pub const MAX_YEAR: i32 = 2022;

/// The 2020 survey season was cancelled, so no data exists for it.
pub const GAP_YEAR: i32 = 2020;

/// Year displayed in place of [`GAP_YEAR`].
pub const GAP_SUBSTITUTE: i32 = 2019;

/// Anything carrying a survey year.
pub trait HasYear {
    fn year(&self) -> i32;
}

/// A year with no data and the year displayed in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearGap {
    pub missing: i32,
    pub substitute: i32,
}

/// Closed `[min_year, max_year]` range of displayable years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min_year: i32,
    pub max_year: i32,
    /// Defaults to the 2020 gap when omitted; an explicit `null` disables it.
    #[serde(default = "default_gap")]
    pub gap: Option<YearGap>,
}

fn default_gap() -> Option<YearGap> {
    Some(YearGap {
        missing: GAP_YEAR,
        substitute: GAP_SUBSTITUTE,
    })
}

impl Default for YearBounds {
    fn default() -> Self {
        YearBounds::new(MIN_YEAR, MAX_YEAR).with_gap(GAP_YEAR, GAP_SUBSTITUTE)
    }
}

impl YearBounds {
    pub fn new(min_year: i32, max_year: i32) -> Self {
        YearBounds {
            min_year,
            max_year,
            gap: None,
        }
    }

    pub fn with_gap(mut self, missing: i32, substitute: i32) -> Self {
        self.gap = Some(YearGap {
            missing,
            substitute,
        });
        self
    }

    /// Number of year steps between the bounds.
    pub fn span(&self) -> i32 {
        self.max_year - self.min_year
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.min_year && year <= self.max_year
    }

    /// Map a requested year to the year actually displayed.
    ///
    /// Clamps into the bounds, then swaps the gap year for its substitute.
    pub fn clean_year(&self, year: i32) -> i32 {
        let year = if year < self.min_year {
            self.min_year
        } else if year > self.max_year {
            self.max_year
        } else {
            year
        };
        match self.gap {
            Some(gap) if gap.missing == year => gap.substitute,
            _ => year,
        }
    }

    /// Parse a slider value (a year as text) into a displayable year.
    pub fn parse_slider_year(&self, value: &str) -> Result<i32, SurveyError> {
        Ok(self.clean_year(parse_year("year", value)?))
    }

    /// Drop every record outside the bounds, returning how many were removed.
    pub fn retain_in_range<T: HasYear>(&self, items: &mut Vec<T>) -> usize {
        let before = items.len();
        items.retain(|item| self.contains(item.year()));
        before - items.len()
    }

    /// Records from `min_year` through `through` (inclusive), in source order.
    pub fn truncate_through<'a, T: HasYear>(
        &self,
        items: &'a [T],
        through: i32,
    ) -> impl Iterator<Item = &'a T> + 'a {
        let min_year = self.min_year;
        items
            .iter()
            .filter(move |item| item.year() >= min_year && item.year() <= through)
    }
}
