// Server module entry point
// Listener setup, the accept loop, connection serving, and signal handling

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the accept-loop module is mounted as server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used types
pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::{start_signal_handler, SignalHandler};
