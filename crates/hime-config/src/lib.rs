//! Configuration management for himewiki.
//!
//! Parses `himewiki.toml` with serde and finds it by walking up from the
//! current directory. CLI settings can be applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [wiki]
//! format = "creole"
//! summary_length = 100
//!
//! [image]
//! domains = ["example.org"]
//! extensions = ["png", "jpeg"]
//!
//! [[links]]
//! key = "wp"
//! url = "https://en.wikipedia.org/wiki/"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! Interwiki URLs (`links[].url`) support `${VAR}` and `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use hime_format::{DialectKind, FormatConfig, ImageConfig, InterwikiLink};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "himewiki.toml";

/// Summary length used when the config does not set one.
const DEFAULT_SUMMARY_LENGTH: usize = 100;

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the default markup dialect.
    pub format: Option<DialectKind>,
    /// Override the summary length.
    pub summary_length: Option<usize>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[wiki]` section as written in TOML.
    wiki: WikiConfigRaw,
    /// Inline image allow-list.
    pub image: ImageSection,
    /// Interwiki prefixes.
    pub links: Vec<LinkConfig>,

    /// Resolved `[wiki]` section (set after loading).
    #[serde(skip)]
    pub wiki_resolved: WikiConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw `[wiki]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WikiConfigRaw {
    format: Option<String>,
    summary_length: Option<usize>,
}

/// Resolved wiki settings.
#[derive(Debug)]
pub struct WikiConfig {
    /// Dialect used when a page does not announce one.
    pub dialect: DialectKind,
    /// Maximum characters in a page summary.
    pub summary_length: usize,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::default(),
            summary_length: DEFAULT_SUMMARY_LENGTH,
        }
    }
}

/// `[image]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImageSection {
    /// Hosts allowed to serve inline images.
    pub domains: Vec<String>,
    /// Image file extensions, without the dot.
    pub extensions: Vec<String>,
}

/// One `[[links]]` entry.
#[derive(Debug, Deserialize)]
pub struct LinkConfig {
    /// Prefix written before the colon, e.g. `wp` in `wp:Rust`.
    pub key: String,
    /// Base URL the path is appended to.
    pub url: String,
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
        /// Config field path (e.g., "`links[0].url`").
        field: String,
        /// Error message (e.g., "${`WIKI_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

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
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `himewiki.toml` in the current directory and its parents, falling
    /// back to defaults when none exists.
    ///
    /// CLI settings are applied last and take precedence over the file.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Self::default()
            }
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Search for the config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(format) = settings.format {
            self.wiki_resolved.dialect = format;
        }
        if let Some(summary_length) = settings.summary_length {
            self.wiki_resolved.summary_length = summary_length;
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse, expand, resolve and validate configuration text.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_wiki();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_wiki()?;
        self.validate_image()?;
        self.validate_links()?;
        Ok(())
    }

    fn validate_wiki(&self) -> Result<(), ConfigError> {
        if self.wiki_resolved.summary_length == 0 {
            return Err(ConfigError::Validation(
                "wiki.summary_length must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_image(&self) -> Result<(), ConfigError> {
        for domain in &self.image.domains {
            require_non_empty(domain, "image.domains entry")?;
        }
        for ext in &self.image.extensions {
            require_non_empty(ext, "image.extensions entry")?;
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "image.extensions entry \"{ext}\" must not start with a dot"
                )));
            }
        }
        Ok(())
    }

    fn validate_links(&self) -> Result<(), ConfigError> {
        for (i, link) in self.links.iter().enumerate() {
            let key_field = format!("links[{i}].key");
            require_non_empty(&link.key, &key_field)?;
            if !link.key.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::Validation(format!(
                    "{key_field} must contain only ASCII letters and digits"
                )));
            }
            if self.links[..i].iter().any(|other| other.key == link.key) {
                return Err(ConfigError::Validation(format!(
                    "{key_field} duplicates interwiki key \"{}\"",
                    link.key
                )));
            }

            let url_field = format!("links[{i}].url");
            require_non_empty(&link.url, &url_field)?;
            require_http_url(&link.url, &url_field)?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        for (i, link) in self.links.iter_mut().enumerate() {
            link.url = expand::expand_env(&link.url, &format!("links[{i}].url"))?;
        }
        Ok(())
    }

    /// Resolve the raw `[wiki]` section. Unknown dialect names fall back to
    /// the default dialect with a warning.
    fn resolve_wiki(&mut self) {
        let dialect = match self.wiki.format.as_deref() {
            None => DialectKind::default(),
            Some(name) => name.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, fallback = %DialectKind::default(), "Unknown wiki.format");
                DialectKind::default()
            }),
        };
        self.wiki_resolved = WikiConfig {
            dialect,
            summary_length: self.wiki.summary_length.unwrap_or(DEFAULT_SUMMARY_LENGTH),
        };
    }

    /// Build the renderer configuration.
    #[must_use]
    pub fn format_config(&self) -> FormatConfig {
        FormatConfig {
            image: ImageConfig {
                domains: self.image.domains.clone(),
                extensions: self.image.extensions.clone(),
            },
            links: self
                .links
                .iter()
                .map(|link| InterwikiLink::new(link.key.clone(), link.url.clone()))
                .collect(),
            default_dialect: self.wiki_resolved.dialect,
        }
    }
}
