//! Per-command context: loaded config, output formatter and API login.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info, warn};
use zabbix_dna_core::config::{AuthMethod, BulkMode, Config, OutputFormat};
use zabbix_dna_core::storage::{Session, SessionStore};
use zabbix_dna_core::ZabbixClient;

use crate::cli::{Cli, FormatArg};
use crate::error::{ApiError, CliError};
use crate::output::{get_formatter, Listing, OutputFormatter};

/// Global flags that apply to every command, including nested batch lines.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub config: Option<PathBuf>,
    pub format: Option<FormatArg>,
    pub timeout: Option<u64>,
    pub verbose: bool,
    pub strict: bool,
}

impl From<&Cli> for Globals {
    fn from(cli: &Cli) -> Self {
        Globals {
            config: cli.config.clone(),
            format: cli.format,
            timeout: cli.timeout,
            verbose: cli.verbose,
            strict: cli.strict,
        }
    }
}

impl Globals {
    /// Flags given on an inner line win over the outer invocation.
    pub fn overlay(&self, inner: &Globals) -> Globals {
        Globals {
            config: inner.config.clone().or_else(|| self.config.clone()),
            format: inner.format.or(self.format),
            timeout: inner.timeout.or(self.timeout),
            verbose: inner.verbose || self.verbose,
            strict: inner.strict || self.strict,
        }
    }
}

pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub format: OutputFormat,
    strict: bool,
    formatter: Box<dyn OutputFormatter>,
}

impl Context {
    /// Load the config file; a missing file is an error.
    pub fn load(globals: &Globals) -> Result<Self, CliError> {
        let config_path = Config::resolve_path(globals.config.as_deref());
        let mut config = Config::load(&config_path)?;
        if let Some(timeout) = globals.timeout {
            config.api.timeout = timeout;
        }
        debug!(path = %config_path.display(), "config loaded");

        Ok(Self::with_config(config, config_path, globals))
    }

    pub fn with_config(config: Config, config_path: PathBuf, globals: &Globals) -> Self {
        let format = globals
            .format
            .map(OutputFormat::from)
            .unwrap_or(config.app.output.format);
        if !config.app.output.color {
            colored::control::set_override(false);
        }

        Self {
            strict: globals.strict || config.app.bulk_mode == BulkMode::Strict,
            formatter: get_formatter(format),
            config,
            config_path,
            format,
        }
    }

    /// Whether a failed batch line fails the whole run.
    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn formatter(&self) -> &dyn OutputFormatter {
        self.formatter.as_ref()
    }

    pub fn emit(&self, listing: &Listing) {
        println!("{}", self.formatter.format_listing(listing));
    }

    pub fn report(&self, message: &str, result: &Value) {
        println!("{}", self.formatter.format_result(message, result));
    }

    pub fn message(&self, message: &str) {
        println!("{}", self.formatter.format_message(message));
    }

    /// Authenticated client for the configured server.
    ///
    /// An API token is used as is. With username/password a cached session
    /// is reused while the server still accepts it; otherwise a fresh login
    /// is performed and cached.
    pub async fn connect(&self) -> Result<ZabbixClient, CliError> {
        self.config.validate()?;
        let api = &self.config.api;
        let mut client = ZabbixClient::new(&api.url, &api.client_options())?;

        match api.auth_method() {
            Some(AuthMethod::Token(token)) => {
                client.set_token(token);
            }
            Some(AuthMethod::Password { username, password }) => {
                if !self.config.app.use_session_file {
                    client.login(&username, &password).await?;
                    return Ok(client);
                }

                let store = SessionStore::new(self.config.app.session_path());
                if let Some(session) = store.load(&api.url, &username).await? {
                    if client.session_valid(&session.token).await? {
                        debug!(user = %username, "reusing cached session");
                        client.set_token(session.token);
                        client.set_credentials(&username, &password);
                        return Ok(client);
                    }
                    info!("cached session expired, logging in again");
                }

                let token = client.login(&username, &password).await?;
                if let Err(e) = store.save(&Session::new(&api.url, &username, &token)).await {
                    warn!("could not write session file: {}", e);
                }
            }
            None => return Err(ApiError::NotAuthenticated.into()),
        }

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_flags_win() {
        let outer = Globals {
            config: Some(PathBuf::from("outer.toml")),
            format: Some(FormatArg::Table),
            timeout: Some(5),
            verbose: false,
            strict: true,
        };
        let inner = Globals {
            format: Some(FormatArg::Json),
            ..Default::default()
        };

        let merged = outer.overlay(&inner);
        assert_eq!(merged.config, Some(PathBuf::from("outer.toml")));
        assert_eq!(merged.format, Some(FormatArg::Json));
        assert_eq!(merged.timeout, Some(5));
        assert!(merged.strict);
    }

    #[test]
    fn test_format_flag_overrides_config() {
        let config = Config::from_toml_str("[api]\nurl = \"http://zbx\"\n[app.output]\nformat = \"table\"").unwrap();
        let globals = Globals {
            format: Some(FormatArg::Json),
            ..Default::default()
        };

        let ctx = Context::with_config(config, PathBuf::from("x.toml"), &globals);
        assert_eq!(ctx.format, OutputFormat::Json);
    }

    #[test]
    fn test_continue_mode_is_not_strict() {
        let config = Config::from_toml_str("[api]\nurl = \"http://zbx\"\n[app]\nbulk_mode = \"continue\"").unwrap();
        let ctx = Context::with_config(config, PathBuf::from("x.toml"), &Globals::default());
        assert!(!ctx.strict());
    }

    #[tokio::test]
    async fn test_connect_without_credentials() {
        let config = Config::from_toml_str("[api]\nurl = \"http://127.0.0.1:1/api_jsonrpc.php\"").unwrap();
        let ctx = Context::with_config(config, PathBuf::from("x.toml"), &Globals::default());

        let err = ctx.connect().await.err().unwrap();
        assert!(err.to_string().contains("no authentication provided"));
    }
}
