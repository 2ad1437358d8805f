//! Development static file server.
//!
//! Serves a directory over HTTP/1.1 and marks every response, errors
//! included, as uncacheable so browsers always refetch assets.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
