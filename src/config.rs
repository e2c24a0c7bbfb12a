//! YAML configuration for the intake pipeline.
//!
//! Every section is optional and falls back to its defaults, so an empty file
//! (or no file at all) yields a working configuration.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! sender_name: "Derek"
//!
//! bot:
//!   enabled: true
//!   min_interaction_ms: 3000
//!
//! forms:
//!   discovery_prefix: "DISC"
//!   scope_of_work_prefix: "SOW"
//!
//! notify:
//!   channel: "webhook"
//!   webhook_url: "https://hooks.example.com/intake"
//!   auth_header: "Bearer s3cr3t"
//!   timeout_secs: 10
//!
//! render:
//!   lines_per_page: 60
//!   hash_preview_chars: 28
//!   output_dir: "exports"
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use canonical::validate_prefix;
use ingest::{BotPolicy, FormKind};
use render::LayoutConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IntakeConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Sign-off used in client acknowledgements.
    #[serde(default = "default_sender")]
    pub sender_name: String,

    #[serde(default)]
    pub bot: BotPolicy,

    #[serde(default)]
    pub forms: FormsConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IntakeConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: IntakeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if self.sender_name.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "sender_name must not be empty".to_string(),
            ));
        }
        self.forms.validate()?;
        self.notify.validate()?;
        self.render.validate()?;
        Ok(())
    }

    /// Identifier prefix for `kind`.
    pub fn prefix(&self, kind: FormKind) -> &str {
        match kind {
            FormKind::Discovery => &self.forms.discovery_prefix,
            FormKind::ScopeOfWork => &self.forms.scope_of_work_prefix,
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            sender_name: default_sender(),
            bot: BotPolicy::default(),
            forms: FormsConfig::default(),
            notify: NotifyConfig::default(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Per-form identifier prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default = "default_discovery_prefix")]
    pub discovery_prefix: String,

    #[serde(default = "default_sow_prefix")]
    pub scope_of_work_prefix: String,
}

impl FormsConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        for (key, prefix) in [
            ("forms.discovery_prefix", &self.discovery_prefix),
            ("forms.scope_of_work_prefix", &self.scope_of_work_prefix),
        ] {
            validate_prefix(prefix)
                .map_err(|err| ConfigLoadError::Validation(format!("{key}: {err}")))?;
        }
        Ok(())
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            discovery_prefix: default_discovery_prefix(),
            scope_of_work_prefix: default_sow_prefix(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Write payloads to the log; useful locally and in tests.
    Log,
    /// POST payloads as JSON to `webhook_url`.
    Webhook,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_channel")]
    pub channel: ChannelKind,

    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Sent verbatim as the `Authorization` header when present.
    #[serde(default)]
    pub auth_header: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl NotifyConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.channel == ChannelKind::Webhook {
            match self.webhook_url.as_deref() {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some(url) => {
                    return Err(ConfigLoadError::Validation(format!(
                        "notify.webhook_url must be an http(s) URL, got `{url}`"
                    )))
                }
                None => {
                    return Err(ConfigLoadError::Validation(
                        "notify.webhook_url is required for the webhook channel".to_string(),
                    ))
                }
            }
        }
        if self.timeout_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "notify.timeout_secs must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            webhook_url: None,
            auth_header: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,

    #[serde(default = "default_hash_preview_chars")]
    pub hash_preview_chars: usize,

    /// Directory exported documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl RenderConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.lines_per_page < 10 {
            return Err(ConfigLoadError::Validation(
                "render.lines_per_page must be >= 10".to_string(),
            ));
        }
        if self.hash_preview_chars == 0 || self.hash_preview_chars > 64 {
            return Err(ConfigLoadError::Validation(
                "render.hash_preview_chars must be between 1 and 64".to_string(),
            ));
        }
        Ok(())
    }

    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            lines_per_page: self.lines_per_page,
            hash_preview_chars: self.hash_preview_chars,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            lines_per_page: default_lines_per_page(),
            hash_preview_chars: default_hash_preview_chars(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_sender() -> String {
    "The Intake Team".to_string()
}

fn default_discovery_prefix() -> String {
    FormKind::Discovery.default_prefix().to_string()
}

fn default_sow_prefix() -> String {
    FormKind::ScopeOfWork.default_prefix().to_string()
}

fn default_channel() -> ChannelKind {
    ChannelKind::Log
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_lines_per_page() -> usize {
    LayoutConfig::default().lines_per_page
}

fn default_hash_preview_chars() -> usize {
    LayoutConfig::default().hash_preview_chars
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
sender_name: "Derek"
bot:
  min_interaction_ms: 5000
forms:
  discovery_prefix: "DSC"
notify:
  channel: "webhook"
  webhook_url: "https://hooks.example.com/intake"
"#;

        let config = IntakeConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.sender_name, "Derek");
        assert!(config.bot.enabled);
        assert_eq!(config.bot.min_interaction_ms, 5000);
        assert_eq!(config.prefix(FormKind::Discovery), "DSC");
        assert_eq!(config.prefix(FormKind::ScopeOfWork), "SOW");
        assert_eq!(config.notify.channel, ChannelKind::Webhook);
        assert_eq!(config.notify.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1.0"
render:
  lines_per_page: 40
  output_dir: "out/docs"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = IntakeConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.render.lines_per_page, 40);
        assert_eq!(config.render.output_dir, PathBuf::from("out/docs"));
        assert_eq!(config.render.layout().hash_preview_chars, 28);
    }

    #[test]
    fn test_default_config() {
        let config = IntakeConfig::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.notify.channel, ChannelKind::Log);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = IntakeConfig::from_yaml("{}").unwrap();
        assert_eq!(config, IntakeConfig::default());
    }

    #[test]
    fn test_unsupported_version() {
        let result = IntakeConfig::from_yaml("version: \"2.0\"");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_webhook_requires_url() {
        let result = IntakeConfig::from_yaml("notify:\n  channel: webhook\n");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("webhook_url is required"));
    }

    #[test]
    fn test_prefix_validation() {
        let result = IntakeConfig::from_yaml("forms:\n  scope_of_work_prefix: \"sow-x\"\n");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("forms.scope_of_work_prefix"));
    }

    #[test]
    fn test_render_validation() {
        let result = IntakeConfig::from_yaml("render:\n  hash_preview_chars: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = IntakeConfig::from_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
    }
}
