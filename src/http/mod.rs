//! HTTP protocol layer module
//!
//! Protocol helpers decoupled from the file handler: MIME lookup, HTTP dates,
//! response builders and the no-cache header set.

pub mod cache;
pub mod mime;
pub mod no_cache;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_error_response, build_file_response, build_html_response,
    build_redirect_response,
};
