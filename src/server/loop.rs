// Server loop module
// The accept loop: take connections until a shutdown signal, then drain

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config;
use crate::logger;

/// How long in-flight invocations get to finish after shutdown is requested
const DRAIN_GRACE: Duration = Duration::from_secs(5);

/// Run the accept loop until `shutdown` fires, then stop accepting and wait
/// for active connections to drain.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown("Stopped accepting connections");
                break;
            }
        }
    }

    // Closing the listener first keeps new connections out of the drain
    drop(listener);
    drain_connections(&active_connections).await;
}

/// Wait for the active-instance counter to reach zero, up to the grace
/// period.
async fn drain_connections(active_connections: &Arc<AtomicUsize>) {
    let deadline = tokio::time::Instant::now() + DRAIN_GRACE;

    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 {
            logger::log_shutdown("All connections drained");
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period expired with {active} connections still active"
            ));
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
