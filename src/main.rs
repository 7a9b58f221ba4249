// Main entry point
use clap::Parser;
use std::net::SocketAddr;
use translate_gateway::infrastructure::config::{self, Config, Logging};
use translate_gateway::interfaces::cli::Cli;
use translate_gateway::interfaces::http;
use translate_gateway::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        config::generate_config_sample(cli.config.as_deref())?;
        return Ok(());
    }

    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        } else {
            tracing::info!("Received interrupt, shutting down gracefully...");
            let _ = shutdown_tx.send(());
        }
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let app = if cli.webhook {
        eprintln!("Webhook listening on {}", config.server.port);
        http::webhook_router()
    } else {
        log_provider_status(&config);
        let state = AppState::new(config)?;
        tracing::info!(
            default_provider = %state.registry.default_id(),
            providers = %state.registry.identifiers().join(", "),
            timeout_secs = state.config.request_timeout_secs,
            "Translation gateway listening on {}",
            addr
        );
        http::router(state)
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await?;

    Ok(())
}

/// Install the global subscriber: stderr by default, or an append-only file.
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG 优先于配置文件中的级别
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logging.path.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            builder
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

/// Warn early about backends that will answer 500 until a key is set.
fn log_provider_status(config: &Config) {
    let configured = |key: &Option<String>| key.as_deref().is_some_and(|k| !k.trim().is_empty());

    if !configured(&config.xai.api_key) {
        tracing::warn!("xAI API key not configured (XAI_API_KEY)");
    }
    if !configured(&config.claude.api_key) {
        tracing::warn!("Anthropic API key not configured (ANTHROPIC_API_KEY)");
    }
}
