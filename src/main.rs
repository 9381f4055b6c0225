use clap::Parser;
use temperature_dashboard::cli::{run, Cli};
use temperature_dashboard::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
