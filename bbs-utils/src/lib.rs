//! Shared utility functions for BBS crates.

/// Year/date helpers for chart time axes
pub mod dates {
    use chrono::NaiveDate;

    /// January 1st of the given survey year.
    pub fn year_start(year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, 1, 1)
    }

    /// Format a survey year as the "YYYY-MM-DD" date a time axis expects.
    ///
    /// Years chrono cannot represent fall back to the bare year.
    pub fn format_year_axis(year: i32) -> String {
        match year_start(year) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => year.to_string(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_year_axis() {
            assert_eq!(format_year_axis(1980), "1980-01-01");
            assert_eq!(format_year_axis(2022), "2022-01-01");
        }
    }
}

/// Min/max helpers over chart values
pub mod extent {
    /// Smallest and largest finite value, or `None` for an empty input.
    pub fn extent<I>(values: I) -> Option<(f64, f64)>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Integer variant of [`extent`].
    pub fn extent_i32<I>(values: I) -> Option<(i32, i32)>
    where
        I: IntoIterator<Item = i32>,
    {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_extent() {
            assert_eq!(extent(vec![3.0, 1.0, 2.0]), Some((1.0, 3.0)));
            assert_eq!(extent(Vec::<f64>::new()), None);
            assert_eq!(extent(vec![f64::NAN, 4.0]), Some((4.0, 4.0)));
        }

        #[test]
        fn test_extent_i32() {
            assert_eq!(extent_i32(vec![1981, 1980, 2022]), Some((1980, 2022)));
            assert_eq!(extent_i32(Vec::new()), None);
        }
    }
}
