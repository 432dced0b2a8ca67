//! Batch files: one command line per line.

use std::path::Path;

use tracing::info;
use zabbix_dna_core::config::{BulkMode, Config, OutputFormat};

use crate::context::Globals;
use crate::error::CliError;
use crate::output::get_formatter;

use super::{one_line, run_line};

/// Run every command line in `path`.
///
/// Blank lines and `#` comments are skipped. A failing line is reported and
/// the next one still runs.
pub async fn run_batch(path: &Path, globals: &Globals) -> Result<(), CliError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        CliError::InvalidArgument(format!("cannot read batch file {}: {}", path.display(), e))
    })?;

    let lines = command_lines(&content);
    info!(file = %path.display(), lines = lines.len(), "running batch file");

    let mut results: Vec<(String, bool, String)> = Vec::with_capacity(lines.len());
    for line in lines {
        match run_line(line, globals).await {
            Ok(()) => results.push((line.to_string(), true, "ok".to_string())),
            Err(e) => {
                eprintln!("Error in '{}': {}", line, e);
                results.push((line.to_string(), false, one_line(&e.to_string())));
            }
        }
    }

    // Settings are best effort; an unreadable config only affects failed lines
    let config = Config::load(&Config::resolve_path(globals.config.as_deref())).ok();
    let format = globals
        .format
        .map(OutputFormat::from)
        .or_else(|| config.as_ref().map(|c| c.app.output.format))
        .unwrap_or_default();
    let strict = globals.strict
        || config
            .as_ref()
            .map_or(true, |c| c.app.bulk_mode == BulkMode::Strict);

    println!("{}", get_formatter(format).format_bulk_results(&results));

    let failed = results.iter().filter(|(_, ok, _)| !ok).count();
    if strict && failed > 0 {
        return Err(CliError::PartialFailure {
            succeeded: results.len() - failed,
            failed,
        });
    }

    Ok(())
}

fn command_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_comments_and_blanks_skipped() {
        let content = "# setup\n\nhostgroup create Linux\n   \n  host list --limit 5  \n# done\n";
        assert_eq!(
            command_lines(content),
            vec!["hostgroup create Linux", "host list --limit 5"]
        );
    }

    #[tokio::test]
    async fn test_failing_lines_do_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("zabbix-dna.toml");
        std::fs::write(&config, "[api]\nurl = \"http://127.0.0.1:1/api_jsonrpc.php\"\n[app]\nbulk_mode = \"continue\"\n").unwrap();

        let batch = dir.path().join("cmds.txt");
        let mut file = std::fs::File::create(&batch).unwrap();
        writeln!(file, "host frobnicate").unwrap();
        writeln!(file, "version").unwrap();

        let globals = Globals {
            config: Some(config),
            ..Default::default()
        };
        assert!(run_batch(&batch, &globals).await.is_ok());

        let strict = Globals {
            strict: true,
            ..globals
        };
        let err = run_batch(&batch, &strict).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::PartialFailure {
                succeeded: 1,
                failed: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_batch_file() {
        let err = run_batch(Path::new("/nonexistent/cmds.txt"), &Globals::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("cannot read batch file"));
    }
}
