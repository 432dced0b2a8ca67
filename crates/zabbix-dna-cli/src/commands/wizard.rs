//! Interactive configuration wizard.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use zabbix_dna_core::config::{Config, DEFAULT_CONFIG_FILE};

use crate::context::Globals;
use crate::error::CliError;

const LOG_LEVELS: &[&str] = &["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Print `prompt` and read one answer; an empty answer takes `default`.
pub(crate) fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: Option<&str>,
) -> io::Result<String> {
    match default {
        Some(d) if !d.is_empty() => write!(output, "{} [{}]: ", prompt, d)?,
        _ => write!(output, "{}: ", prompt)?,
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }

    let answer = line.trim();
    Ok(match (answer.is_empty(), default) {
        (true, Some(d)) => d.to_string(),
        _ => answer.to_string(),
    })
}

/// Yes/no question.
pub(crate) fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: bool,
) -> io::Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        let answer = ask(input, output, &format!("{} ({})", prompt, hint), None)?;
        match answer.to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer y or n.")?,
        }
    }
}

/// Ask until the answer is not empty.
fn ask_required<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: Option<&str>,
) -> io::Result<String> {
    loop {
        let answer = ask(input, output, prompt, default)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        writeln!(output, "A value is required.")?;
    }
}

/// API URL and credentials, shared with `init`.
pub(crate) fn ask_api<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &mut Config,
) -> io::Result<()> {
    let current_url = (!config.api.url.is_empty()).then(|| config.api.url.clone());
    config.api.url = ask_required(
        input,
        output,
        "Zabbix API URL",
        Some(current_url.as_deref().unwrap_or("http://localhost/api_jsonrpc.php")),
    )?;

    if confirm(input, output, "Authenticate with an API token?", true)? {
        config.api.auth_token = Some(ask_required(input, output, "API token", None)?);
        config.api.username = None;
        config.api.password = None;
    } else {
        let user = config.api.username.clone();
        config.api.username = Some(ask_required(
            input,
            output,
            "Username",
            Some(user.as_deref().unwrap_or("Admin")),
        )?);
        config.api.password = Some(ask_required(input, output, "Password", None)?);
        config.api.auth_token = None;
    }
    Ok(())
}

/// Run the full wizard; returns the config and where to write it.
fn collect<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    mut config: Config,
    default_path: &str,
) -> io::Result<(Config, PathBuf)> {
    writeln!(output, "zabbix-dna configuration wizard\n")?;
    ask_api(input, output, &mut config)?;

    let endpoint = ask(
        input,
        output,
        "OTLP endpoint (empty to skip)",
        config.otlp.endpoint.as_deref(),
    )?;
    config.otlp.endpoint = (!endpoint.is_empty()).then_some(endpoint);

    loop {
        let level = ask(input, output, "Log level", Some(&config.logging.log_level))?.to_uppercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            config.logging.log_level = level;
            break;
        }
        writeln!(output, "Choose one of: {}", LOG_LEVELS.join(", "))?;
    }

    let path = ask_required(input, output, "Config file", Some(default_path))?;
    Ok((config, PathBuf::from(path)))
}

/// Run wizard command
pub fn run_wizard(globals: &Globals) -> Result<(), CliError> {
    let existing = Config::resolve_path(globals.config.as_deref());
    let config = Config::load(&existing).unwrap_or_default();
    let default_path = globals
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let (config, path) = collect(
        &mut stdin.lock(),
        &mut stdout,
        config,
        &default_path.to_string_lossy(),
    )?;

    config.save(&path)?;
    println!("\nConfiguration written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_default() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        let answer = ask(&mut input, &mut output, "URL", Some("http://zbx")).unwrap();
        assert_eq!(answer, "http://zbx");
        assert_eq!(String::from_utf8(output).unwrap(), "URL [http://zbx]: ");
    }

    #[test]
    fn test_ask_eof() {
        let mut input = Cursor::new("");
        assert!(ask(&mut input, &mut Vec::new(), "URL", None).is_err());
    }

    #[test]
    fn test_confirm_retries() {
        let mut input = Cursor::new("maybe\nn\n");
        let mut output = Vec::new();
        assert!(!confirm(&mut input, &mut output, "Token?", true).unwrap());
        assert!(String::from_utf8(output).unwrap().contains("Please answer y or n."));
    }

    #[test]
    fn test_full_wizard_with_password() {
        let answers = "http://zbx/api_jsonrpc.php\nn\n\nsecret\nhttp://collector:4318\nverbose\ndebug\n/tmp/zdna.toml\n";
        let mut input = Cursor::new(answers);
        let mut output = Vec::new();

        let (config, path) = collect(&mut input, &mut output, Config::default(), "zabbix-dna.toml").unwrap();

        assert_eq!(path, PathBuf::from("/tmp/zdna.toml"));
        assert_eq!(config.api.url, "http://zbx/api_jsonrpc.php");
        assert_eq!(config.api.username.as_deref(), Some("Admin"));
        assert_eq!(config.api.password.as_deref(), Some("secret"));
        assert!(config.api.auth_token.is_none());
        assert_eq!(config.otlp.endpoint.as_deref(), Some("http://collector:4318"));
        assert_eq!(config.logging.log_level, "DEBUG");
    }

    #[test]
    fn test_token_replaces_password() {
        let mut config = Config::default();
        config.api.username = Some("Admin".to_string());
        config.api.password = Some("zabbix".to_string());

        let mut input = Cursor::new("http://zbx\ny\nabc123\n");
        ask_api(&mut input, &mut Vec::new(), &mut config).unwrap();

        assert_eq!(config.api.auth_token.as_deref(), Some("abc123"));
        assert!(config.api.username.is_none());
    }
}
