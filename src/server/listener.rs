use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::http::dispatcher::Dispatcher;

/// Accepts connections one at a time. Each is read, dispatched and answered
/// before the next `accept`.
pub async fn run(cfg: &ServerConfig, dispatcher: Dispatcher) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on http://{}", cfg.listen_addr);

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "Accept failed");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, dispatcher.clone(), cfg.recv_buffer_size)
            .with_read_timeout(cfg.read_timeout());
        if let Err(e) = conn.run().await {
            tracing::error!("Connection error from {}: {}", peer, e);
        }
    }
}
