// Configuration module entry point
// Loads the explicit configuration value and the runtime state built from it

mod cli;
mod state;
mod types;

use std::net::SocketAddr;

use crate::error::StartupError;

// Re-export public types
pub use cli::Cli;
pub use state::AppState;
pub use types::{AccessLogFormat, Config, HttpConfig, LoggingConfig, ServerConfig};

/// Environment variable prefix, e.g. `NOCACHE__SERVER__PORT`
pub const ENV_PREFIX: &str = "NOCACHE";

impl Config {
    /// Load configuration from defaults, `NOCACHE__*` environment variables and CLI flags
    ///
    /// Precedence is CLI > environment > defaults. No configuration file is read.
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        Self::load_with_env(cli, env_source())
    }

    /// Same as [`Config::load`] with an explicit environment source
    pub fn load_with_env(
        cli: &Cli,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(env)
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.root", "web")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("logging.json", false)?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("http.directory_listing", true)?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("server.host", cli.bind.clone())?
            .set_override_option(
                "server.root",
                cli.directory
                    .as_ref()
                    .map(|d| d.to_string_lossy().into_owned()),
            )?
            .set_override_option("logging.level", cli.log_level.clone())?
            .set_override_option("logging.access_log", cli.quiet.then_some(false))?
            .set_override_option("http.directory_listing", cli.no_listing.then_some(false))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| StartupError::InvalidAddress { addr, source })
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("http.index_files")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env_with(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        env_source().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::load_with_env(&Cli::default(), env_with(&[])).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.root, PathBuf::from("web"));
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.http.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.http.directory_listing);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, AccessLogFormat::Common);
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:8080".parse().unwrap()
        );
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let env = env_with(&[
            ("NOCACHE__SERVER__PORT", "9090"),
            ("NOCACHE__SERVER__WORKERS", "2"),
            ("NOCACHE__HTTP__INDEX_FILES", "main.html,index.html"),
            ("NOCACHE__LOGGING__ACCESS_LOG_FORMAT", "combined"),
        ]);
        let cfg = Config::load_with_env(&Cli::default(), env).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.http.index_files, vec!["main.html", "index.html"]);
        assert_eq!(cfg.logging.access_log_format, AccessLogFormat::Combined);
    }

    #[test]
    fn test_cli_overrides_environment() {
        let cli = Cli {
            port: Some(3000),
            bind: Some("127.0.0.1".to_string()),
            directory: Some(PathBuf::from("/srv/site")),
            no_listing: true,
            quiet: true,
            log_level: Some("debug".to_string()),
        };
        let env = env_with(&[("NOCACHE__SERVER__PORT", "9090")]);
        let cfg = Config::load_with_env(&cli, env).unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.root, PathBuf::from("/srv/site"));
        assert!(!cfg.http.directory_listing);
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_invalid_host_is_reported() {
        let cli = Cli {
            bind: Some("not an address".to_string()),
            ..Cli::default()
        };
        let cfg = Config::load_with_env(&cli, env_with(&[])).unwrap();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(StartupError::InvalidAddress { .. })
        ));
    }
}
