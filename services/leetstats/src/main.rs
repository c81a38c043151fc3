use anyhow::Result;
use common::StatsConfig;
use leetstats::{Controller, HttpTransport, TerminalSurface};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing on stderr, stdout carries the page
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting leetstats");

    let config = StatsConfig::from_env()?;
    let transport = HttpTransport::new(&config)?;
    let controller = Controller::from_config(&config, transport, TerminalSurface::stdout());

    let usernames: Vec<String> = std::env::args().skip(1).collect();
    if usernames.is_empty() {
        info!("Reading usernames from stdin, one search per line");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            controller.search(&line).await;
        }
    } else {
        for username in &usernames {
            controller.search(username).await;
        }
    }

    info!("Shutting down leetstats");

    Ok(())
}
