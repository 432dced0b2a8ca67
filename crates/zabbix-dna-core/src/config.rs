//! TOML configuration file.
//!
//! Every field has a default that is used only when the field is absent from
//! the file; explicit values (including `0`, `false` and empty strings) are
//! kept as written.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::ClientOptions;
use crate::error::ConfigError;

/// File name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "zabbix-dna.toml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SERVICE_NAME: &str = "zabbix-dna";
pub const DEFAULT_SALT_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, alias = "zabbix")]
    pub api: ApiConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub otlp: OtlpConfig,
    #[serde(default)]
    pub salt: SaltConfig,
}

// ==================== [api] ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "user", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, alias = "token", skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
    /// Seconds; 0 disables the timeout
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: None,
            password: None,
            auth_token: None,
            verify_ssl: true,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// How the client authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    Token(String),
    Password { username: String, password: String },
}

impl ApiConfig {
    /// Token wins over username/password.
    pub fn auth_method(&self) -> Option<AuthMethod> {
        if let Some(token) = non_empty(&self.auth_token) {
            return Some(AuthMethod::Token(token.to_string()));
        }

        match (non_empty(&self.username), non_empty(&self.password)) {
            (Some(username), Some(password)) => Some(AuthMethod::Password {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => None,
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
            verify_ssl: self.verify_ssl,
        }
    }
}

// ==================== [app] ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkMode {
    /// Any failed line makes the whole run fail
    #[default]
    Strict,
    /// Failed lines are reported but the run succeeds
    Continue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub use_session_file: bool,
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default = "default_true")]
    pub history: bool,
    #[serde(default = "default_history_file")]
    pub history_file: String,
    #[serde(default)]
    pub bulk_mode: BulkMode,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            use_session_file: false,
            session_file: default_session_file(),
            history: true,
            history_file: default_history_file(),
            bulk_mode: BulkMode::Strict,
            output: OutputConfig::default(),
            commands: CommandsConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn session_path(&self) -> PathBuf {
        expand_home(&self.session_file)
    }

    pub fn history_path(&self) -> PathBuf {
        expand_home(&self.history_file)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandsConfig {
    #[serde(default)]
    pub create_host: CreateHostConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHostConfig {
    #[serde(default = "default_true")]
    pub create_interface: bool,
    /// Host group names used when none are given on the command line
    #[serde(default)]
    pub hostgroups: Vec<String>,
}

impl Default for CreateHostConfig {
    fn default() -> Self {
        Self {
            create_interface: true,
            hostgroups: Vec::new(),
        }
    }
}

// ==================== [logging] ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    pub fn log_path(&self) -> Option<PathBuf> {
        non_empty(&self.log_file).map(expand_home)
    }
}

// ==================== [otlp] ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtlpConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for OtlpConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            protocol: default_protocol(),
            service_name: default_service_name(),
        }
    }
}

// ==================== [salt] ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaltConfig {
    #[serde(default = "default_salt_url")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default = "default_eauth")]
    pub eauth: String,
}

impl Default for SaltConfig {
    fn default() -> Self {
        Self {
            url: default_salt_url(),
            user: None,
            password: None,
            eauth: default_eauth(),
        }
    }
}

// ==================== Loading ====================

impl Config {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Pick the config file to use.
    ///
    /// An explicit path is used as given. Otherwise `zabbix-dna.toml` in the
    /// working directory, then the platform config directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return local;
        }

        match crate::storage::default_config_dir().map(|d| d.join(DEFAULT_CONFIG_FILE)) {
            Some(path) if path.exists() => path,
            _ => local,
        }
    }

    /// Check the fields every API command needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_session_file() -> String {
    "~/.zabbix-dna/session.json".to_string()
}

fn default_history_file() -> String {
    "~/.zabbix-dna/history".to_string()
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_protocol() -> String {
    "http".to_string()
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_salt_url() -> String {
    DEFAULT_SALT_URL.to_string()
}

fn default_eauth() -> String {
    "pam".to_string()
}
