//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: matches the path to a hosted
//! function, runs it, and records the invocation.

use crate::config::AppState;
use crate::handler::functions;
use crate::http;
use crate::logger;
use crate::logger::InvocationLogEntry;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Any HTTP method reaches the matched function; an unmatched path gets the
/// 404 answer. The invocation log line is written after the function ran, so
/// it carries the real status and body size.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let (function, response) = if matches_function(&path, functions::HELLO_WORLD_PATH) {
        (functions::HELLO_WORLD, functions::serve_hello_world())
    } else if matches_function(&path, functions::ALEXA_SKILL_PATH) {
        (
            functions::ALEXA_SKILL,
            functions::serve_alexa_skill(req, &state).await,
        )
    } else {
        logger::log_warning(&format!("No function mounted at: {path}"));
        ("-", http::build_404_response())
    };

    if state.config.logging.access_log {
        let mut entry = InvocationLogEntry::new(function, peer_addr.to_string(), method, path);
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        entry.duration_us = elapsed_us(&started);
        logger::log_invocation(&entry, &state.config.logging.format);
    }

    Ok(response)
}

/// A request path invokes a function when it equals the mount path or sits
/// anywhere under it.
fn matches_function(path: &str, mount: &str) -> bool {
    path == mount
        || path
            .strip_prefix(mount)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Exact body size of an outgoing response
fn body_len(response: &Response<Full<Bytes>>) -> usize {
    use hyper::body::Body;

    response
        .body()
        .size_hint()
        .exact()
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or(0)
}

fn elapsed_us(started: &Instant) -> u64 {
    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)
}
