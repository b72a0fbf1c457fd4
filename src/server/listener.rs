use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::info;

use crate::config::Config;
use crate::files::{FileResolver, StaticHandler};
use crate::http::connection::Connection;

/// Pending connections the OS queues while one client is being served.
pub const LISTEN_BACKLOG: u32 = 3;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(cfg)?;
    info!("Listening on {}:{}", cfg.host, cfg.port);

    let handler = StaticHandler::new(FileResolver::new(cfg.web_root.clone()));
    serve(listener, &handler, cfg.max_request_bytes).await
}

/// Binds an IPv4 listener with the configured address and a backlog of 3.
pub fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let addr = cfg.listen_addr()?;

    let socket = TcpSocket::new_v4().context("socket creation failed")?;
    socket
        .set_reuseaddr(true)
        .context("failed to set SO_REUSEADDR")?;
    socket
        .bind(addr.into())
        .with_context(|| format!("bind to {addr} failed"))?;

    socket
        .listen(LISTEN_BACKLOG)
        .with_context(|| format!("listen on {addr} failed"))
}

/// Serves connections one at a time until accepting fails.
///
/// Each connection is driven to completion before the next `accept`, so a
/// slow client blocks everyone queued behind it.
pub async fn serve(
    listener: TcpListener,
    handler: &StaticHandler,
    max_request_bytes: usize,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await.context("accept failed")?;
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, handler, max_request_bytes);
        if let Err(e) = conn.run().await {
            tracing::error!("Connection error from {}: {}", peer, e);
        }
    }
}
