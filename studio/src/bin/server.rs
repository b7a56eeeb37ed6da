//! QR studio server binary.
//!
//! Starts the axum web server, the idle-session sweeper, and signal handling.

use tracing_subscriber::EnvFilter;

use qr_studio_lib::app::SharedState;
use qr_studio_lib::background;
use qr_studio_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting QR studio");

    let config = qr_studio_lib::init_foundation();
    let state = SharedState::new(config);

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    let s = state.clone();
    tokio::spawn(async move { background::session_sweep_loop(s).await });

    tracing::info!(
        port = state.server_port(),
        "QR studio running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    state.exports().read().await.cancel_all();
    state.shutdown_token().cancel();
    if let Err(e) = server_handle.await {
        tracing::warn!("Server task ended abnormally: {e}");
    }
    Ok(())
}
