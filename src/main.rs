use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;

use todo_desk::{
    bootstrap::ensure_initial_list, config::AppConfig, db::connection, logging::init_tracing,
    routes::app, state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        eprintln!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging)?;

    let db = connection::connect(&cfg.database)
        .await
        .context("failed to open database")?;
    let state = AppState::new(cfg, &db);

    ensure_initial_list(&state.services, &state.config.lists)
        .await
        .context("failed to create default list")?;

    let addr: SocketAddr = format!("{}:{}", state.config.general.host, state.config.general.port)
        .parse()
        .context("invalid host/port")?;
    let app = app(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
