pub mod api;
pub mod assets;
pub mod pages;
pub mod router;
pub mod view;

use std::net::{IpAddr, SocketAddr};

use crate::app::SharedState;
use anyhow::Result;

/// Start the axum HTTP server.
pub async fn start_server(state: SharedState) -> Result<()> {
    let ip: IpAddr = state.config().host.parse()?;
    let addr = SocketAddr::new(ip, state.server_port());
    let shutdown_token = state.shutdown_token().clone();
    let app = router::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("QR studio listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
        .await?;

    Ok(())
}
