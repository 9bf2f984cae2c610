use anyhow::Context;
use clap::Parser;
use colored::*;
use epichart::cli::Args;
use epichart::{Dashboard, source};
use std::process;
use tracing::{debug, info};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    setup_logging(&args);

    // Create async runtime and run the server until Ctrl+C
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    if let Err(error) = runtime.block_on(run(args)) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.load_config().context("Invalid configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let source = source::from_config(&config).context("Failed to set up dataset source")?;
    let dashboard = Dashboard::new(config, source.clone()).context("Failed to load templates")?;

    println!(
        "{}",
        "Epichart - case counts by country".bright_green().bold()
    );
    println!("  {} {}", "Dataset:".bright_cyan(), source.name());
    println!(
        "  {} http://{}",
        "Serving:".bright_cyan(),
        dashboard.config().listen_addr()
    );

    epichart::server::serve(dashboard, shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
    eprintln!("\nReceived CTRL+C, shutting down gracefully...");
    info!("Shutdown requested");
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("epichart={},tower_http={}", log_level, log_level))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
