//! WQD CLI - turns water-quality CSV exports into chart-ready JSON.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wqd-cli",
    version,
    about = "Water-quality dashboard data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: wqd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    wqd_cmd::run(cli.command).await
}
