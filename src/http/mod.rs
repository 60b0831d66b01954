//! HTTP server module.
//!
//! Binds the listen socket, serves the router with per-connection remote
//! address info, and drains connections gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::start_server;
