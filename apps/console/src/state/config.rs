//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LIBRIS_*`)
//! 2. Config file (`LIBRIS_CONFIG`, else `<config dir>/libris.toml`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! library_name = "Branch Library"
//! output = "text"   # text | json
//!
//! [[seed.books]]
//! id = "B1"
//! title = "Dune"
//!
//! [[seed.magazines]]
//! id = "M1"
//! issue = "2024-03"
//!
//! [[seed.users]]
//! name = "Alice"
//! kind = "guest"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use libris_core::validation::{validate_item_id, validate_label, validate_member_name};
use libris_core::{CoreResult, MemberKind, Registry, User};

/// Explicit config file path.
pub const ENV_CONFIG: &str = "LIBRIS_CONFIG";
/// Overrides `library_name`.
pub const ENV_LIBRARY_NAME: &str = "LIBRIS_LIBRARY_NAME";
/// Overrides `output` (`text` or `json`).
pub const ENV_OUTPUT: &str = "LIBRIS_OUTPUT";

const DEFAULT_LIBRARY_NAME: &str = "Libris Library";

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Output Format
// =============================================================================

/// How the shell renders responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,

    /// One JSON document per response.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_OUTPUT.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Seed Catalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedBook {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMagazine {
    pub id: String,
    pub issue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub name: String,
    pub kind: String,
}

/// Items and members registered into the fresh registry at startup.
///
/// Read once; never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedCatalog {
    pub books: Vec<SeedBook>,
    pub magazines: Vec<SeedMagazine>,
    pub users: Vec<SeedUser>,
}

impl SeedCatalog {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.magazines.is_empty() && self.users.is_empty()
    }

    /// Registers every seed entry, or nothing if any entry is invalid.
    pub fn apply(&self, registry: &mut Registry) -> CoreResult<()> {
        for book in &self.books {
            validate_item_id(&book.id)?;
            validate_label("title", &book.title)?;
        }
        for magazine in &self.magazines {
            validate_item_id(&magazine.id)?;
            validate_label("issue", &magazine.issue)?;
        }
        let users = self
            .users
            .iter()
            .map(|user| -> CoreResult<User> {
                validate_member_name(&user.name)?;
                let kind: MemberKind = user.kind.parse()?;
                Ok(User::new(user.name.clone(), kind))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        for book in &self.books {
            registry.add_book(book.id.clone(), book.title.clone());
        }
        for magazine in &self.magazines {
            registry.add_magazine(magazine.id.clone(), magazine.issue.clone());
        }
        for user in users {
            registry.add_user(user);
        }
        Ok(())
    }
}

// =============================================================================
// Config State
// =============================================================================

/// On-disk shape of `libris.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    library_name: Option<String>,
    output: Option<OutputFormat>,
    seed: SeedCatalog,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown in the shell banner.
    pub library_name: String,

    /// Shell rendering mode.
    pub output: OutputFormat,

    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,

    /// Startup catalog.
    pub seed: SeedCatalog,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            library_name: DEFAULT_LIBRARY_NAME.to_string(),
            output: OutputFormat::Text,
            config_path: None,
            seed: SeedCatalog::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from the process environment and config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `env` to look up variables.
    ///
    /// A path given through `LIBRIS_CONFIG` must exist; the platform default
    /// path is optional.
    pub fn load_with<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match env(ENV_CONFIG) {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => ConfigState::default(),
            },
        };

        config.apply_env(&env)?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading config file");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&text)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses TOML text, filling missing keys with defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        let defaults = ConfigState::default();

        Ok(ConfigState {
            library_name: file.library_name.unwrap_or(defaults.library_name),
            output: file.output.unwrap_or(defaults.output),
            config_path: None,
            seed: file.seed,
        })
    }

    fn apply_env<F>(&mut self, env: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = env(ENV_LIBRARY_NAME) {
            if !name.trim().is_empty() {
                self.library_name = name;
            }
        }

        if let Some(output) = env(ENV_OUTPUT) {
            self.output = output.parse()?;
        }

        Ok(())
    }
}

/// Platform config location.
///
/// - **Linux**: `~/.config/libris/libris.toml`
/// - **macOS**: `~/Library/Application Support/org.libris.libris/libris.toml`
/// - **Windows**: `%APPDATA%\libris\libris\config\libris.toml`
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "libris", "libris").map(|dirs| dirs.config_dir().join("libris.toml"))
}
