//! Logger module
//!
//! Provides logging utilities for the functions host including:
//! - Host lifecycle logging
//! - Per-invocation logging with json/plain formats
//! - Structured records emitted from inside function handlers
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::{FunctionLogRecord, InvocationLogEntry};

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/invocation log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to the invocation log specifically
fn write_access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Functions host started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info("Functions: /helloWorld, /alexaSkill");
    write_info(&format!(
        "Max concurrent instances: {}",
        config.functions.max_instances
    ));
    write_info(&format!("Fact catalog: {} entries", config.skill.facts.len()));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Invocation log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("Using Tokio runtime for concurrency");
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log one formatted invocation entry
pub fn log_invocation(entry: &InvocationLogEntry, format: &str) {
    write_access(&entry.format(format));
}

/// Emit a structured record on behalf of a function handler
pub fn log_structured(function: &str, message: &str) {
    write_info(&FunctionLogRecord::info(function, message).format_json());
}

pub fn log_shutdown(reason: &str) {
    write_info(&format!("\n[Shutdown] {reason}"));
}
