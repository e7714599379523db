mod api;
mod config;
mod error;
mod lexicon;
mod sentiment;
mod tokenizer;

use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::lexicon::Lexicon;
use crate::sentiment::Analyzer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::load()?;

    let lexicon = match &config.lexicon_path {
        Some(path) => Arc::new(
            Lexicon::load(path).with_context(|| format!("loading lexicon from {}", path.display()))?,
        ),
        None => Lexicon::builtin(),
    };
    info!(
        source = lexicon.source(),
        entries = lexicon.len(),
        negation = config.negation,
        "lexicon loaded"
    );

    let state = Arc::new(api::AppState {
        analyzer: Analyzer::new(lexicon).with_negation(config.negation),
        max_body_bytes: config.max_body_bytes,
    });

    let app = api::router(state);

    let listener = config
        .bind()
        .await
        .with_context(|| format!("binding {}:{}", config.host, config.port))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
