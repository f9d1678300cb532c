//! IronBrief CLI — the main entry point.
//!
//! Commands:
//! - `serve`  — Start the HTTP webhook gateway
//! - `ask`    — Run one message through the pipeline from the terminal
//! - `status` — Show configuration and knowledge base summary

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "ironbrief",
    about = "IronBrief — a grounded product-assistant webhook service",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP webhook gateway
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a single message through the pipeline
    Ask {
        /// The message to process
        message: String,
    },

    /// Show configuration and knowledge base summary
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Ask { message } => commands::ask::run(message).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
