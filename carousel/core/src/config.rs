//! TOML Configuration File Support
//!
//! Centralized configuration loading for the carousel manager, from a TOML
//! file at `~/.config/carousel/carousel.toml`.
//!
//! # Configuration Priority
//!
//! Values are applied with the following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [notifications]
//! ttl_ms = 3000
//!
//! [generation]
//! timeout_secs = 60
//! default_emoji = "✨"
//! endpoint = "http://localhost:8000/carousel"
//!
//! [slides]
//! placeholder_title = "New slide"
//! placeholder_content = "Text..."
//! placeholder_emoji = "📝"
//! palette = ["from-purple-600 to-pink-500 text-white", "from-gray-800 to-gray-900 text-white"]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notifications::DEFAULT_TTL;
use crate::slides::{BackgroundStyle, SlideTemplate};

/// Background tokens cycled through when a generated slide has no
/// pre-request counterpart
pub const DEFAULT_PALETTE: [&str; 6] = [
    "from-purple-600 to-pink-500 text-white",
    "from-blue-400 to-emerald-400 text-white",
    "from-orange-400 to-rose-500 text-white",
    "from-gray-800 to-gray-900 text-white",
    "from-gray-100 to-gray-200 text-gray-900",
    "from-slate-900 to-slate-800 text-white",
];

/// Emoji used when the generator leaves one out
pub const DEFAULT_EMOJI: &str = "✨";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Notifications section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsToml {
    /// How long a notification stays visible, in milliseconds
    pub ttl_ms: Option<u64>,
}

/// Generation section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationToml {
    /// Deadline for one generator call, in seconds (0 = none)
    pub timeout_secs: Option<u64>,

    /// Emoji for generated slides that come without one
    pub default_emoji: Option<String>,

    /// Generator endpoint used by surfaces that talk HTTP
    pub endpoint: Option<String>,
}

/// Slides section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlidesToml {
    /// Title of a hand-added slide
    pub placeholder_title: Option<String>,

    /// Body of a hand-added slide
    pub placeholder_content: Option<String>,

    /// Emoji of a hand-added slide
    pub placeholder_emoji: Option<String>,

    /// Background tokens for generated slides
    pub palette: Option<Vec<String>>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselToml {
    /// Notifications section
    pub notifications: NotificationsToml,

    /// Generation section
    pub generation: GenerationToml,

    /// Slides section
    pub slides: SlidesToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration for the carousel manager
#[derive(Clone, Debug)]
pub struct ManagerConfig {
    /// How long a notification stays visible
    pub notification_ttl: Duration,

    /// Deadline for one generator call (`None` = wait indefinitely)
    pub generation_timeout: Option<Duration>,

    /// Emoji for generated slides that come without one
    pub default_emoji: String,

    /// Generator endpoint (only used by HTTP surfaces)
    pub endpoint: Option<String>,

    /// Placeholders for hand-added slides
    pub template: SlideTemplate,

    /// Background tokens for generated slides
    pub palette: Vec<BackgroundStyle>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    pub source: ConfigSource,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            notification_ttl: DEFAULT_TTL,
            generation_timeout: None,
            default_emoji: DEFAULT_EMOJI.to_string(),
            endpoint: None,
            template: SlideTemplate::default(),
            palette: DEFAULT_PALETTE.iter().map(|s| BackgroundStyle::new(*s)).collect(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ManagerConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check values that would break the manager
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty palette or a
    /// zero notification lifetime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::ValidationError(
                "slides.palette must not be empty".to_string(),
            ));
        }
        if self.notification_ttl.is_zero() {
            return Err(ConfigError::ValidationError(
                "notifications.ttl_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/carousel/carousel.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("carousel").join("carousel.toml"))
}

/// Load configuration from the default path, then the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// resulting configuration is invalid. A missing file is not an error.
pub fn load_config() -> Result<ManagerConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path, then the environment
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the resulting
/// configuration is invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ManagerConfig, ConfigError> {
    let mut config = load_file_config(path)?;
    apply_env_config(&mut config, |key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Defaults overlaid with the TOML file at `path`, if it exists
fn load_file_config(path: Option<PathBuf>) -> Result<ManagerConfig, ConfigError> {
    let mut config = ManagerConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: CarouselToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ManagerConfig, toml: &CarouselToml) {
    if let Some(ms) = toml.notifications.ttl_ms {
        config.notification_ttl = Duration::from_millis(ms);
    }

    if let Some(secs) = toml.generation.timeout_secs {
        config.generation_timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Some(ref emoji) = toml.generation.default_emoji {
        config.default_emoji = emoji.clone();
    }
    if toml.generation.endpoint.is_some() {
        config.endpoint = toml.generation.endpoint.clone();
    }

    if let Some(ref title) = toml.slides.placeholder_title {
        config.template.title = title.clone();
    }
    if let Some(ref content) = toml.slides.placeholder_content {
        config.template.content = content.clone();
    }
    if let Some(ref emoji) = toml.slides.placeholder_emoji {
        config.template.emoji = emoji.clone();
    }
    if let Some(ref palette) = toml.slides.palette {
        config.palette = palette.iter().map(|s| BackgroundStyle::new(s.as_str())).collect();
        if let Some(first) = config.palette.first() {
            config.template.fallback_background = first.clone();
        }
    }
}

/// Apply environment overrides, reading variables through `var`
fn apply_env_config(config: &mut ManagerConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(ttl) = var("CAROUSEL_NOTIFY_TTL_MS") {
        if let Ok(ms) = ttl.parse::<u64>() {
            config.notification_ttl = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(timeout) = var("CAROUSEL_GENERATION_TIMEOUT") {
        if let Ok(secs) = timeout.parse::<u64>() {
            config.generation_timeout = (secs > 0).then(|| Duration::from_secs(secs));
            config.source = ConfigSource::Env;
        }
    }
    if let Some(url) = var("CAROUSEL_GENERATOR_URL") {
        if !url.trim().is_empty() {
            config.endpoint = Some(url);
            config.source = ConfigSource::Env;
        }
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Command-line overrides, applied last
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Generator endpoint override
    pub endpoint: Option<String>,

    /// Generation timeout override (seconds, 0 = none)
    pub generation_timeout_secs: Option<u64>,

    /// Notification lifetime override (milliseconds)
    pub notification_ttl_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint override
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set generation timeout override
    #[must_use]
    pub fn with_generation_timeout_secs(mut self, secs: u64) -> Self {
        self.generation_timeout_secs = Some(secs);
        self
    }

    /// Set notification lifetime override
    #[must_use]
    pub fn with_notification_ttl_ms(mut self, ms: u64) -> Self {
        self.notification_ttl_ms = Some(ms);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoint.is_none()
            && self.generation_timeout_secs.is_none()
            && self.notification_ttl_ms.is_none()
    }

    /// Apply the overrides to `config`
    pub fn apply(&self, config: &mut ManagerConfig) {
        if self.is_empty() {
            return;
        }
        if let Some(ref endpoint) = self.endpoint {
            config.endpoint = Some(endpoint.clone());
        }
        if let Some(secs) = self.generation_timeout_secs {
            config.generation_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(ms) = self.notification_ttl_ms {
            config.notification_ttl = Duration::from_millis(ms);
        }
        config.source = ConfigSource::Cli;
    }
}
