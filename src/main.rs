use clap::Parser;
use spreadscan::cli::{self, Cli};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tokio::select! {
        result = cli::dispatch(&cli) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                eprintln!("spreadscan: {e}");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("spreadscan stopped");
}
