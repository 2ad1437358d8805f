//! Request handler module
//!
//! Responsible for resolving request paths against the root directory and
//! producing file, index, listing, redirect or error responses.

pub mod listing;
pub mod resolve;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
