// Server module entry point
// Listener creation, accept loop, per-connection service and shutdown signals

pub mod connection;
pub mod listener;
pub mod middleware;
pub mod signal;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used types
pub use listener::create_listener;
pub use middleware::NoCache;
pub use server_loop::start_server_loop;
pub use signal::ShutdownSignal;
