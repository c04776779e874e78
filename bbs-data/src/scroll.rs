//! Scroll position to survey year mapping.

use bbs_survey::{error::SurveyError, years::YearBounds};
use log::debug;
use serde::{Deserialize, Serialize};

/// Fraction of the page, `[start, finish)`, over which the year animates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollWindow {
    pub start: f64,
    pub finish: f64,
}

impl Default for ScrollWindow {
    fn default() -> Self {
        ScrollWindow {
            start: 0.5,
            finish: 0.75,
        }
    }
}

impl ScrollWindow {
    pub fn new(start: f64, finish: f64) -> Self {
        ScrollWindow { start, finish }
    }

    /// Year for a scroll progress value.
    ///
    /// Before `start` this is `min_year`, from `finish` on it is `max_year`, and in
    /// between it steps linearly, flooring `span * (percent - start) / (finish - start)`.
    pub fn year_at(&self, percent: f64, bounds: &YearBounds) -> i32 {
        if percent < self.start {
            return bounds.min_year;
        }
        if percent >= self.finish {
            return bounds.max_year;
        }
        let fraction = (percent - self.start) / (self.finish - self.start);
        // NaN progress lands here and saturates to a zero offset.
        let offset = (bounds.span() as f64 * fraction).floor() as i32;
        (bounds.min_year + offset).min(bounds.max_year)
    }
}

/// Fraction of the page seen so far: bottom of the viewport over page height.
///
/// Returns 0 for a non-positive page height and clamps to `[0, 1]`.
pub fn scroll_progress(offset: f64, viewport: f64, total: f64) -> f64 {
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    let progress = (offset + viewport) / total;
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// [`ScrollWindow::year_at`] with the window and bounds passed as plain values.
pub fn year_for_scroll_progress(
    percent: f64,
    start: f64,
    finish: f64,
    min_year: i32,
    max_year: i32,
) -> i32 {
    ScrollWindow::new(start, finish).year_at(percent, &YearBounds::new(min_year, max_year))
}

/// Turns scroll and slider events into redraw requests.
///
/// Only a change of displayed year produces a redraw.
#[derive(Debug, Clone)]
pub struct YearDriver {
    window: ScrollWindow,
    bounds: YearBounds,
    last: Option<i32>,
}

impl YearDriver {
    pub fn new(window: ScrollWindow, bounds: YearBounds) -> Self {
        YearDriver {
            window,
            bounds,
            last: None,
        }
    }

    /// The year most recently handed out for drawing.
    pub fn current(&self) -> Option<i32> {
        self.last
    }

    pub fn on_scroll(&mut self, progress: f64) -> Option<i32> {
        let year = self.window.year_at(progress, &self.bounds);
        self.on_year(year)
    }

    pub fn on_slider(&mut self, value: &str) -> Result<Option<i32>, SurveyError> {
        let year = self.bounds.parse_slider_year(value)?;
        Ok(self.on_year(year))
    }

    /// Clean `year` and return it if it differs from the last drawn year.
    pub fn on_year(&mut self, year: i32) -> Option<i32> {
        let year = self.bounds.clean_year(year);
        if self.last == Some(year) {
            debug!("year {} unchanged, skipping redraw", year);
            return None;
        }
        self.last = Some(year);
        Some(year)
    }
}
