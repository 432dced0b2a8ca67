//! tracing subscriber setup.
//!
//! Logs go to stderr, or to `logging.log_file` when set, so stdout stays
//! clean for table and JSON output.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use zabbix_dna_core::config::LoggingConfig;

/// Filter directive for the given settings.
///
/// `RUST_LOG` is handled by the caller; here `-v` means debug for our own
/// crates, an enabled `[logging]` section uses its level, and everything
/// else only shows warnings.
pub fn directive(verbose: bool, logging: Option<&LoggingConfig>) -> String {
    if verbose {
        return "warn,zabbix_dna=debug,zabbix_dna_core=debug".to_string();
    }

    match logging {
        Some(l) if l.enabled => l.log_level.trim().to_lowercase(),
        _ => "warn".to_string(),
    }
}

pub fn init(verbose: bool, logging: Option<&LoggingConfig>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbose, logging)));

    let log_path = logging
        .filter(|l| l.enabled)
        .and_then(LoggingConfig::log_path);

    if let Some(path) = log_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = std::fs::create_dir_all(parent);
        }
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
                return;
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", path.display(), e),
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive() {
        let mut logging = LoggingConfig::default();
        assert_eq!(directive(false, Some(&logging)), "warn");

        logging.enabled = true;
        logging.log_level = "DEBUG".to_string();
        assert_eq!(directive(false, Some(&logging)), "debug");

        assert!(directive(true, Some(&logging)).contains("zabbix_dna_core=debug"));
        assert_eq!(directive(false, None), "warn");
    }
}
