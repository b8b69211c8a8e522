use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use tracing::info;

pub async fn start(app: Router, addr: SocketAddr) -> Result<()> {
    let server = axum::Server::try_bind(&addr)?.serve(app.into_make_service());
    info!("Listening on {}.", server.local_addr());
    server.with_graceful_shutdown(shutdown_signal()).await?;
    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("Shutting down.");
}
