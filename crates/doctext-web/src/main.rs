use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod handlers;
mod models;
mod router;
mod settings;
mod state;
mod template;
mod upload;

#[cfg(test)]
mod tests;

use settings::Settings;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = doctext_core::config_file::load_config();
    let settings = Settings::resolve(&config, |key| std::env::var(key).ok())?;

    if let Some(dir) = &settings.temp_dir {
        std::fs::create_dir_all(dir)?;
    }

    let state = Arc::new(AppState {
        extractor: Arc::new(doctext_ingest::default_extractor(settings.temp_dir.clone())),
    });

    let app = router::build_router(state, settings.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    tracing::info!(
        addr = %settings.bind,
        max_upload_bytes = settings.max_upload_bytes,
        "listening on http://{}",
        settings.bind
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
