//! Configuration system
//!
//! Loads `clients.toml` describing the digest's named clients, each tagged
//! with a provider (`github` | `matrix`), plus a `[general]` section for
//! shared defaults. Invalid configuration is fatal before any fetch begins.

mod clients;
pub mod validation;

pub use clients::{ClientConfig, ClientsConfig, GeneralSettings, GithubSection, MatrixSection};
pub use validation::{validate_config, validate_config_result, ValidationError};

use std::path::PathBuf;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "clients.toml";

/// Resolve the config path: explicit flag, then `./clients.toml`, then
/// `~/.config/tidings/clients.toml`.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }

    dirs::home_dir()
        .map(|home| home.join(".config").join("tidings").join(DEFAULT_CONFIG_FILE))
        .unwrap_or(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_config_path(Some(PathBuf::from("/tmp/custom.toml")));
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }
}
