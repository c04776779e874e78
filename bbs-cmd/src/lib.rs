//! Command implementations for the BBS CLI.
//!
//! Provides subcommands that load the survey tables, inspect the
//! aggregation, and produce per-year frames and scroll timelines.

use clap::Subcommand;

pub mod load;
pub mod render;
pub mod summary;
pub mod timeline;

#[derive(Subcommand)]
pub enum Command {
    /// Load the survey tables and report what was indexed and skipped
    Summary {
        /// Directory holding route.csv, year_route.csv, year.csv and year_species.csv
        #[arg(short = 'd', long, default_value = "data")]
        data_dir: String,

        /// Optional JSON visualization config
        #[arg(short = 'c', long)]
        config: Option<String>,
    },

    /// Print the year shown at a scroll position
    Year {
        /// Scroll progress in [0, 1]
        #[arg(short = 'p', long, conflicts_with_all = ["offset", "viewport", "total"])]
        progress: Option<f64>,

        /// Pixels scrolled from the top of the page
        #[arg(long, requires_all = ["viewport", "total"])]
        offset: Option<f64>,

        /// Viewport height in pixels
        #[arg(long)]
        viewport: Option<f64>,

        /// Total page height in pixels
        #[arg(long)]
        total: Option<f64>,

        /// Optional JSON visualization config
        #[arg(short = 'c', long)]
        config: Option<String>,
    },

    /// Write the JSON drawing frame for one year
    Frame {
        /// Requested year (clamped into range, gap year substituted)
        #[arg(short = 'y', long)]
        year: String,

        /// Directory holding the survey tables
        #[arg(short = 'd', long, default_value = "data")]
        data_dir: String,

        /// Optional JSON visualization config
        #[arg(short = 'c', long)]
        config: Option<String>,

        /// Output path (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Sweep the scroll position and list the years that trigger a redraw
    Timeline {
        /// Number of evenly spaced scroll steps from 0 to 1
        #[arg(short = 's', long, default_value_t = 100)]
        steps: u32,

        /// Optional JSON visualization config
        #[arg(short = 'c', long)]
        config: Option<String>,

        /// Output CSV path (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary { data_dir, config } => {
            summary::run_summary(&data_dir, config.as_deref()).await
        }
        Command::Year {
            progress,
            offset,
            viewport,
            total,
            config,
        } => timeline::run_year(progress, offset, viewport, total, config.as_deref()).await,
        Command::Frame {
            year,
            data_dir,
            config,
            output,
        } => render::run_frame(&year, &data_dir, config.as_deref(), output.as_deref()).await,
        Command::Timeline {
            steps,
            config,
            output,
        } => timeline::run_timeline(steps, config.as_deref(), output.as_deref()).await,
    }
}
