//! Data processing for the Breeding Bird Survey scrollytelling charts.
//!
//! Everything here runs once at startup (aggregation, color scales) or is a
//! pure lookup invoked per scroll/slider event (year mapping, frames). The
//! structures are read-only after [`dataset::Dataset::assemble`] returns.

pub mod aggregate;
pub mod color;
pub mod config;
pub mod dataset;
pub mod frame;
pub mod scroll;
pub mod series;

/// Stroke colors shared by the charts.
pub mod palette {
    /// Route map endpoints: high counts toward the first, low toward the second.
    pub const ROUTE_COLORS: [&str; 2] = ["#90ee90", "#ff0000"];

    /// Per-species line strokes, cycled by series index.
    pub const SPECIES_STROKES: [&str; 5] = ["red", "green", "yellow", "blue", "orange"];

    /// Total birds line.
    pub const TOTAL_STROKE: &str = "blue";

    /// Average birds per route line.
    pub const AVERAGE_STROKE: &str = "red";

    pub fn species_stroke(index: usize) -> &'static str {
        SPECIES_STROKES[index % SPECIES_STROKES.len()]
    }

    #[cfg(test)]
    mod tests {
        use super::species_stroke;

        #[test]
        fn test_species_stroke_cycles() {
            assert_eq!(species_stroke(0), "red");
            assert_eq!(species_stroke(4), "orange");
            assert_eq!(species_stroke(5), "red");
        }
    }
}
