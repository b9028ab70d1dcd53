use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use api_server::config::AppConfig;
use api_server::http::HttpServer;
use api_server::observability::logging::Logger;
use api_server::lifecycle;

#[derive(Parser)]
#[command(about = "HTTP API server")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config/local.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Fail fast: startup errors are fatal.
    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load {}: {}", args.config.display(), err);
            std::process::exit(1);
        }
    };

    let fmt_layer = if config.log.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .with(fmt_layer)
        .init();

    tracing::info!(
        bind_address = %config.server.bind_address,
        shutdown_grace_secs = config.server.shutdown_grace_secs,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    let logger = Logger::new();
    let (server, handle) = HttpServer::new(&config.server, logger.clone());

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // The serve loop and the shutdown coordinator progress independently:
    // the loop runs on its own task while this task waits for a signal.
    let serve = tokio::spawn(server.run(listener));

    lifecycle::shutdown(
        handle,
        Duration::from_secs(config.server.shutdown_grace_secs),
        &logger,
    )
    .await;

    // The coordinator's deadline has passed or the drain finished; collect
    // the serve result if the loop already exited, otherwise just leave.
    if serve.is_finished() {
        serve.await??;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
