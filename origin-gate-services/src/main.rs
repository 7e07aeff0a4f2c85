use origin_gate_services::{
    config::Settings, logging::setup_logging, server::build_router, state::AppState,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new();
    setup_logging(settings.log_json)?;

    let addr = settings.socket_addr()?;
    let state = Arc::new(AppState::new(settings));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Origin gate listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
