mod api;
mod router;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::state::AppState;

fn load_config() -> precis_core::Config {
    precis_core::config::load_dotenv();
    precis_core::Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    config.log_summary();

    let state = AppState::from_config(&config).context("failed to create Ollama client")?;
    tokio::fs::create_dir_all(&state.upload_dir)
        .await
        .with_context(|| format!("failed to create {}", state.upload_dir.display()))?;
    tokio::fs::create_dir_all(&state.output_dir)
        .await
        .with_context(|| format!("failed to create {}", state.output_dir.display()))?;

    let app = router::build_router(Arc::new(state), &config.server.cors_origin);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;

    Ok(())
}
