//! Clients configuration file handling
//!
//! Loads the `clients.toml` file describing named digest clients. The file
//! holds one `[general]` (or `[settings]`) section for shared defaults plus
//! one section per client, tagged by an `api` field:
//!
//! ```toml
//! [general]
//! body_limit = 120
//!
//! [myrepo]
//! api = "github"
//! owner = "someorg"
//! repo = "somerepo"
//! access_token = "ghp_..."
//!
//! [myroom]
//! api = "matrix"
//! config = "matrix.json"
//! room_id = "!abc:example.org"
//! ```
//!
//! Settings resolve client-section-first, then general, then a built-in
//! default. Sections without an `api` tag are ignored.

use crate::{Result, TidingsError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default character budget for issue/PR bodies in the digest
const DEFAULT_BODY_LIMIT: i64 = 100;

/// Shared settings from the `[general]` / `[settings]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralSettings {
    /// Character budget for issue/PR bodies (zero or negative disables truncation)
    #[serde(default)]
    pub body_limit: Option<i64>,

    /// Default Matrix credentials file
    #[serde(default)]
    pub config: Option<PathBuf>,

    /// Default Matrix room id
    #[serde(default)]
    pub room_id: Option<String>,
}

/// One GitHub client section
#[derive(Debug, Clone, Deserialize)]
pub struct GithubSection {
    pub owner: String,
    pub repo: String,
    pub access_token: String,

    /// Display name for the digest heading (defaults to the section name)
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub body_limit: Option<i64>,
}

/// One Matrix client section
///
/// Credentials path and room id may come from `[general]` instead; resolution
/// happens in [`ClientsConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixSection {
    #[serde(default)]
    pub config: Option<PathBuf>,

    #[serde(default)]
    pub room_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

/// A client section, dispatched on its `api` tag
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "api", rename_all = "lowercase")]
pub enum ClientConfig {
    Github(GithubSection),
    Matrix(MatrixSection),
}

impl ClientConfig {
    /// The configured display name override, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            ClientConfig::Github(s) => s.name.as_deref(),
            ClientConfig::Matrix(s) => s.name.as_deref(),
        }
    }
}

/// The parsed clients configuration
#[derive(Debug, Clone, Default)]
pub struct ClientsConfig {
    pub general: GeneralSettings,
    /// Client sections keyed by section name (deterministic iteration order)
    pub clients: BTreeMap<String, ClientConfig>,
}

impl ClientsConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TidingsError::Config(format!("Cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: BTreeMap<String, serde_json::Value> = toml::from_str(contents)?;

        let mut config = Self::default();
        for (section_name, value) in table {
            if !value.is_object() {
                // Top-level scalars carry nothing we use
                continue;
            }

            if section_name == "general" || section_name == "settings" {
                config.general = serde_json::from_value(value).map_err(|e| {
                    TidingsError::Config(format!("Invalid [{}] section: {}", section_name, e))
                })?;
                continue;
            }

            // Only sections with an `api` tag are client sections
            if value.get("api").is_none() {
                continue;
            }

            let client: ClientConfig = serde_json::from_value(value).map_err(|e| {
                TidingsError::Config(format!("Invalid client section [{}]: {}", section_name, e))
            })?;
            config.clients.insert(section_name, client);
        }

        Ok(config)
    }

    /// Display name for a client: per-section `name`, else the section name
    pub fn display_name<'a>(&'a self, section_name: &'a str) -> &'a str {
        self.clients
            .get(section_name)
            .and_then(|c| c.name())
            .unwrap_or(section_name)
    }

    /// Body budget for a client, falling back to general, then the default
    pub fn body_limit(&self, section_name: &str) -> i64 {
        let client_limit = match self.clients.get(section_name) {
            Some(ClientConfig::Github(s)) => s.body_limit,
            _ => None,
        };
        client_limit
            .or(self.general.body_limit)
            .unwrap_or(DEFAULT_BODY_LIMIT)
    }

    /// Matrix credentials file for a section, falling back to general
    pub fn matrix_credentials_path<'a>(&'a self, section: &'a MatrixSection) -> Option<&'a Path> {
        section
            .config
            .as_deref()
            .or(self.general.config.as_deref())
    }

    /// Matrix room id for a section, falling back to general
    pub fn matrix_room_id<'a>(&'a self, section: &'a MatrixSection) -> Option<&'a str> {
        section
            .room_id
            .as_deref()
            .or(self.general.room_id.as_deref())
    }
}
