use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dlq_dash::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing. The server is chatty by default; the terminal
    // subcommands stay quiet so tables are not interleaved with log lines.
    let default_filter = if matches!(cli.command, Commands::Serve) {
        "dlq_dash=debug,tower_http=debug,axum=debug"
    } else {
        "dlq_dash=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = cli::run(cli).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
