//! BBS CLI - Command line tool for the Breeding Bird Survey scrollytelling data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bbs-cli",
    version,
    about = "North American Breeding Bird Survey scrollytelling data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: bbs_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("bbs-cli {}", env!("CARGO_PKG_VERSION"));
    bbs_cmd::run(cli.command).await
}
