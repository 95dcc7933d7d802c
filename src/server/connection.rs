// Connection handling module
// Accepts and serves one TCP connection under the instance cap

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config;
use crate::handler;
use crate::logger;

/// Accept one connection, enforcing `functions.max_instances`.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active instance counter
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<config::AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    let max_instances = state.config.functions.max_instances;
    if !under_instance_cap(prev_count, max_instances) {
        // Exceeded limit: rollback counter and drop
        conn_counter.fetch_sub(1, Ordering::SeqCst);
        logger::log_warning(&format!(
            "Max instances reached: {prev_count}/{max_instances}. Connection dropped."
        ));
        drop(stream);
        return;
    }

    if state.config.logging.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    handle_connection(
        stream,
        peer_addr,
        Arc::clone(state),
        Arc::clone(conn_counter),
    );
}

/// Whether a connection that observed `prev_count` active instances still
/// fits under the cap.
fn under_instance_cap(prev_count: usize, max_instances: u64) -> bool {
    prev_count < usize::try_from(max_instances).unwrap_or(usize::MAX)
}

/// Serve a single connection in a spawned task.
///
/// Wraps the TCP stream in `TokioIo`, serves HTTP/1.1 with keep-alive, and
/// decrements the instance counter when the connection closes. The whole
/// connection runs under `functions.instance_timeout`, so an idle socket
/// cannot hold its instance slot forever.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<config::AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let timeout_duration =
            std::time::Duration::from_secs(state.config.functions.instance_timeout);

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }

        // Decrement active instance counter
        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
