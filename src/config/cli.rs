use clap::Parser;
use std::path::PathBuf;

/// Serve a directory over HTTP with every response marked uncacheable.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "nocache-serve", version, about)]
pub struct Cli {
    /// Port to listen on
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(short, long, value_name = "HOST")]
    pub bind: Option<String>,

    /// Directory to serve (relative paths resolve against the executable's directory)
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Answer 403 instead of generating a listing for directories without an index file
    #[arg(long)]
    pub no_listing: bool,

    /// Disable the access log
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}
