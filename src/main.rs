//! usersearch - in-memory user search over HTTP
//!
//! `usersearch serve` runs the search service over a JSON dataset;
//! `usersearch search` queries a running service with the bundled client.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, warn};
use usersearch_cli::{execute_command, exit_code_for_error, SearchCommand, ServeCommand};
use usersearch_core::logging::{init_logger, logger_config_from_env};

#[derive(Parser)]
#[command(name = "usersearch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "In-memory user search service and client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the search server
    Serve(ServeCommand),

    /// Query a running search server
    Search(SearchCommand),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = logger_config_from_env();
    if cli.verbose {
        log_config.level = "debug".to_string();
    }
    if cli.json_logs {
        log_config.json_format = true;
    }
    init_logger(log_config).context("Failed to initialize logging")?;

    let result = match cli.command {
        Commands::Serve(cmd) => execute_command(cmd).await,
        Commands::Search(cmd) => execute_command(cmd).await,
        Commands::Version => {
            println!("{}", usersearch_core::version_info());
            Ok(())
        }
    };

    if let Err(e) = result {
        if e.is_fatal() {
            error!(category = e.category(), "Fatal error: {}", e);
        } else {
            warn!(category = e.category(), "{}", e);
        }
        eprintln!("Error: {}", e);
        std::process::exit(exit_code_for_error(&e));
    }

    Ok(())
}
