//! Rolechat CLI and REST API entry point.
//!
//! Binary name: `rolechat`
//!
//! Parses CLI arguments, wires up the stores and services, then either
//! starts the REST API server or prints a status summary.

mod http;
mod state;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use state::AppState;

/// Role-play chat server backed by flat JSON files.
#[derive(Parser)]
#[command(name = "rolechat", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config).
        #[arg(long)]
        host: Option<String>,
    },

    /// Show data directory, store, and endpoint status.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,rolechat=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Rolechat API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!(
                    "  {} completion endpoint: {}",
                    console::style("·").dim(),
                    console::style(&state.config.completion.base_url).dim()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Status => {
            let usernames = state.accounts.list_usernames().await?;
            let chat_users = state.chat_service.list_users().await?;

            if cli.json {
                let status = serde_json::json!({
                    "data_dir": state.data_dir,
                    "accounts": usernames.len(),
                    "users_with_chats": chat_users.len(),
                    "completion_endpoint": state.config.completion.base_url,
                    "model": state.config.completion.model,
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!();
                println!(
                    "  {} Rolechat status",
                    console::style("💬").bold()
                );
                println!();
                println!("  data dir:       {}", state.data_dir.display());
                println!("  accounts:       {}", usernames.len());
                println!("  users w/ chats: {}", chat_users.len());
                println!(
                    "  completion:     {} ({})",
                    state.config.completion.base_url, state.config.completion.model
                );
                println!();
            }
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
