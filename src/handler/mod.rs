//! Request handler module
//!
//! Routes incoming requests to the hosted function endpoints and writes the
//! per-invocation log line.

pub mod functions;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
