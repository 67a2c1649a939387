//! Configuration types and loading for formsmith.
//!
//! The main entry point is [`FormsmithConfig`], the contents of
//! `.formsmith/config.yaml`. It is loaded with [`load_config`], which layers
//! the file over built-in defaults and `FORMSMITH_*` environment variables
//! over the file, and saved with [`save_config`].

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use formsmith_core::enums::{CssFramework, ExportFormat};
use formsmith_core::options::FormOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Name of the configuration file inside the project directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Prefix of environment overrides. `__` separates nested keys, so
/// `FORMSMITH_EXPORT__INDENT=4` sets `export.indent`.
pub const ENV_PREFIX: &str = "FORMSMITH_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// The layered configuration could not be extracted.
    #[error("failed to load config: {0}")]
    Load(#[from] figment::Error),

    /// The configuration could not be serialized to YAML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The `.formsmith/` directory was not found.
    #[error("no .formsmith directory found (run 'formsmith init' first)")]
    ProjectDirNotFound,

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// A lookup named a key that does not exist.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Defaults for `formsmith export`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Format used when `--format` is not given.
    #[serde(default)]
    pub format: ExportFormat,

    /// Class vocabulary of the markup generator.
    #[serde(default)]
    pub framework: CssFramework,

    /// Spaces per indentation level (1 to 8).
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Tag of the WordPress shortcode.
    #[serde(default = "default_shortcode_tag")]
    pub shortcode_tag: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            framework: CssFramework::default(),
            indent: default_indent(),
            shortcode_tag: default_shortcode_tag(),
        }
    }
}

fn default_indent() -> usize {
    2
}

fn default_shortcode_tag() -> String {
    "formsmith".to_string()
}

/// Defaults applied to forms that do not carry their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Name used when a document has none.
    #[serde(default = "default_form_name")]
    pub name: String,

    /// Options used when a document has none.
    #[serde(default)]
    pub options: FormOptions,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            name: default_form_name(),
            options: FormOptions::default(),
        }
    }
}

fn default_form_name() -> String {
    "Untitled Form".to_string()
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full formsmith configuration, corresponding to `.formsmith/config.yaml`.
///
/// Every field has a serde default so that a partial file deserializes with
/// sensible values for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FormsmithConfig {
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub form: FormConfig,
}

impl FormsmithConfig {
    /// Checks values that deserialize fine but are out of range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=8).contains(&self.export.indent) {
            return Err(ConfigError::InvalidValue {
                key: "export.indent".into(),
                reason: format!("must be between 1 and 8, got {}", self.export.indent),
            });
        }
        if self.export.shortcode_tag.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "export.shortcode_tag".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Every leaf setting as a dotted key and its display value, in file order.
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let tree = serde_yaml::to_value(self)?;
        let mut out = Vec::new();
        flatten("", &tree, &mut out);
        Ok(out)
    }

    /// Looks up one setting by dotted key, e.g. `export.format`.
    pub fn get(&self, key: &str) -> Result<String> {
        self.entries()?
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }
}

fn flatten(prefix: &str, value: &serde_yaml::Value, out: &mut Vec<(String, String)>) {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let Some(k) = k.as_str() else { continue };
                let key = if prefix.is_empty() {
                    k.to_string()
                } else {
                    format!("{}.{}", prefix, k)
                };
                flatten(&key, v, out);
            }
        }
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        Value::Bool(b) => out.push((prefix.to_string(), b.to_string())),
        Value::Number(n) => out.push((prefix.to_string(), n.to_string())),
        Value::Null => out.push((prefix.to_string(), String::new())),
        other => {
            let text = serde_yaml::to_string(other).unwrap_or_default();
            out.push((prefix.to_string(), text.trim_end().to_string()));
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Builds the layered provider: defaults, then the file (if any), then the
/// environment.
fn figment(project_dir: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(FormsmithConfig::default()));
    if let Some(dir) = project_dir {
        figment = figment.merge(Yaml::file(dir.join(CONFIG_FILE_NAME)));
    }
    figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["dir"]).split("__"))
}

/// Load configuration from `config.yaml` inside the given `.formsmith/`
/// directory, with environment overrides applied on top.
///
/// A missing directory or file yields the defaults (plus any environment
/// overrides).
///
/// # Errors
///
/// Returns [`ConfigError::Load`] if a layer contains a value of the wrong
/// shape, or [`ConfigError::InvalidValue`] if a value is out of range.
pub fn load_config(project_dir: Option<&Path>) -> Result<FormsmithConfig> {
    let config: FormsmithConfig = figment(project_dir).extract()?;
    config.validate()?;
    debug!(
        dir = ?project_dir,
        format = %config.export.format,
        "loaded configuration"
    );
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given `.formsmith/`
/// directory. The directory is created if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] on I/O failure or [`ConfigError::Serialize`]
/// if serialization fails.
pub fn save_config(project_dir: &Path, config: &FormsmithConfig) -> Result<()> {
    std::fs::create_dir_all(project_dir)?;
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(project_dir.join(CONFIG_FILE_NAME), yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
