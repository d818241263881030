//! Configuration management for ydoc.
//!
//! Parses `ydoc.toml` with serde and provides auto-discovery of the config
//! file in the current directory and its parents. CLI settings can be
//! applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! title = "Infrastructure Configuration"
//! repository = "https://github.com/acme/infra"
//! branch = "main"
//!
//! [output]
//! individual = "docs/generated"
//! aggregated = "docs/README.md"
//!
//! [discovery]
//! extensions = ["yaml", "yml"]
//! forbid_spaces = true
//!
//! [[sources]]
//! path = "prometheus/jobs"
//! section = "Prometheus Scrape Configs"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `repository`, `branch`, `output.individual` and `output.aggregated`
//! support `${VAR}` and `${VAR:-default}`.

mod expand;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "ydoc.toml";

/// Default per-file output directory, relative to the config directory.
const DEFAULT_INDIVIDUAL_DIR: &str = "docs/generated";

/// Default aggregated document path, relative to the config directory.
const DEFAULT_AGGREGATED_PATH: &str = "docs/README.md";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override per-file output directory.
    pub individual_dir: Option<PathBuf>,
    /// Override aggregated document path.
    pub aggregated_path: Option<PathBuf>,
    /// Override whether the aggregated document is written.
    pub aggregate_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Title of the aggregated document.
    pub title: String,
    /// Repository URL used to link generated pages back to their sources.
    pub repository: Option<String>,
    /// Branch used in source links.
    pub branch: String,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Source discovery configuration.
    pub discovery: DiscoveryConfig,
    /// Source entries (paths are relative strings from TOML).
    sources: Vec<SourceRaw>,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Resolved sources in configuration order (set after loading).
    #[serde(skip)]
    pub sources_resolved: Vec<Source>,
    /// Directory that relative source paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    individual: Option<String>,
    aggregated: Option<String>,
    aggregate: Option<bool>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory receiving one Markdown file per source file.
    pub individual_dir: PathBuf,
    /// Combined document path, or `None` when aggregation is disabled.
    pub aggregated_path: Option<PathBuf>,
}

/// Source discovery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// File extensions (without dot) treated as sources when walking directories.
    pub extensions: Vec<String>,
    /// Reject source file names containing spaces.
    pub forbid_spaces: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["yaml".to_owned(), "yml".to_owned()],
            forbid_spaces: true,
        }
    }
}

/// Raw source entry as parsed from TOML.
#[derive(Debug, Deserialize)]
struct SourceRaw {
    path: String,
    #[serde(default)]
    section: Option<String>,
}

/// A configured source: a single file or a directory to walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    /// Absolute (or base-relative) path to a file or directory.
    pub path: PathBuf,
    /// Heading that groups this source's documents in the aggregated document.
    pub section: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "repository").
        field: String,
        /// Error message (e.g., "${`REPO_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `ydoc.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from TOML text, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, variable expansion or validation fails.
    pub fn from_toml(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.individual_dir {
            self.output_resolved.individual_dir.clone_from(dir);
        }
        if let Some(path) = &settings.aggregated_path {
            self.output_resolved.aggregated_path = Some(path.clone());
        }
        if settings.aggregate_enabled == Some(false) {
            self.output_resolved.aggregated_path = None;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            title: "Documentation".to_owned(),
            repository: None,
            branch: "main".to_owned(),
            output: OutputConfigRaw::default(),
            discovery: DiscoveryConfig::default(),
            sources: Vec::new(),
            output_resolved: OutputConfig {
                individual_dir: base.join(DEFAULT_INDIVIDUAL_DIR),
                aggregated_path: Some(base.join(DEFAULT_AGGREGATED_PATH)),
            },
            sources_resolved: Vec::new(),
            base_dir: base.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "title")?;
        require_non_empty(&self.branch, "branch")?;
        if let Some(ref repository) = self.repository {
            require_non_empty(repository, "repository")?;
            require_http_url(repository, "repository")?;
        }
        self.validate_discovery()?;
        self.validate_sources()?;
        Ok(())
    }

    /// Validate discovery configuration.
    fn validate_discovery(&self) -> Result<(), ConfigError> {
        if self.discovery.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "discovery.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &self.discovery.extensions {
            require_non_empty(ext, "discovery.extensions")?;
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "discovery.extensions entry \"{ext}\" must not start with a dot"
                )));
            }
        }
        Ok(())
    }

    /// Validate source entries.
    fn validate_sources(&self) -> Result<(), ConfigError> {
        if self.sources_resolved.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[sources]] entry is required".to_owned(),
            ));
        }
        let mut seen = HashSet::new();
        for source in &self.sources_resolved {
            if !seen.insert(&source.path) {
                return Err(ConfigError::Validation(format!(
                    "sources contains {} more than once",
                    source.path.display()
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref repository) = self.repository {
            self.repository = Some(expand::expand_env(repository, "repository")?);
        }
        self.branch = expand::expand_env(&self.branch, "branch")?;
        if let Some(ref individual) = self.output.individual {
            self.output.individual = Some(expand::expand_env(individual, "output.individual")?);
        }
        if let Some(ref aggregated) = self.output.aggregated {
            self.output.aggregated = Some(expand::expand_env(aggregated, "output.aggregated")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let aggregated_path = self.output.aggregate.unwrap_or(true).then(|| {
            resolve(self.output.aggregated.as_deref(), DEFAULT_AGGREGATED_PATH)
        });
        self.output_resolved = OutputConfig {
            individual_dir: resolve(self.output.individual.as_deref(), DEFAULT_INDIVIDUAL_DIR),
            aggregated_path,
        };

        self.sources_resolved = self
            .sources
            .iter()
            .map(|source| Source {
                path: config_dir.join(&source.path),
                section: source.section.clone(),
            })
            .collect();
        self.base_dir = config_dir.to_path_buf();
    }
}
