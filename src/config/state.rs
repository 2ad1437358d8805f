// Application state module
// Immutable per-process state shared by every connection

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::StartupError;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical root directory; every served path must stay beneath it
    pub root: PathBuf,
}

impl AppState {
    /// Build state from configuration, resolving and validating the root directory
    pub fn new(config: Config) -> Result<Self, StartupError> {
        let root = resolve_root(&config.server.root)?;
        Ok(Self { config, root })
    }
}

/// Resolve the configured root to a canonical directory path
///
/// Relative roots are anchored at the directory holding the executable. When
/// nothing exists there (e.g. the binary lives under `target/`), the current
/// working directory is tried instead.
pub fn resolve_root(configured: &Path) -> Result<PathBuf, StartupError> {
    let candidate = if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(configured)));
        match beside_exe {
            Some(path) if path.exists() => path,
            _ => configured.to_path_buf(),
        }
    };

    let root = candidate
        .canonicalize()
        .map_err(|source| StartupError::RootUnavailable {
            path: candidate.clone(),
            source,
        })?;

    if !root.is_dir() {
        return Err(StartupError::RootNotDirectory(root));
    }

    Ok(root)
}
