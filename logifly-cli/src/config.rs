//! Configuration file discovery.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use logifly::LogiflyConfig;
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Default location: `<config dir>/logifly/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("logifly").join(CONFIG_FILE_NAME))
}

/// Load the configuration from `explicit`, or from the default location.
///
/// A missing default file yields an empty configuration; a missing explicit
/// file is an error.
pub fn load(explicit: Option<&Path>) -> Result<LogiflyConfig> {
    if let Some(path) = explicit {
        debug!("Loading config from {}", path.display());
        return LogiflyConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            debug!("Loading config from {}", path.display());
            LogiflyConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        _ => {
            debug!("No configuration file found, starting without groups");
            Ok(LogiflyConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[groups]]\nname = \"alerts\"").unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.groups[0].name, "alerts");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
