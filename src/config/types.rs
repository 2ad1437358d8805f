// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served to clients; relative paths are resolved at startup
    pub root: PathBuf,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    #[serde(default)]
    pub access_log_format: AccessLogFormat,
    /// Emit JSON lines instead of the compact human format
    #[serde(default)]
    pub json: bool,
}

/// Access log line layout
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessLogFormat {
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    #[default]
    Common,
    /// Common plus `"$http_referer" "$http_user_agent"`
    Combined,
}

/// HTTP behavior configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Files tried, in order, when a directory is requested
    pub index_files: Vec<String>,
    /// Generate an HTML listing for directories without an index file
    pub directory_listing: bool,
}
