//! Interactive command shell.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use zabbix_dna_core::config::{Config, OutputFormat};
use zabbix_dna_core::storage::History;

use crate::context::Globals;
use crate::error::CliError;
use crate::output::get_formatter;

use super::run_line;

const PROMPT: &str = "zabbix-dna> ";
const HISTORY_SHOWN: usize = 20;

const HELP: &str = "\
Shell commands:
  :help, :h, :?     Show this help
  :q, :exit, exit   Leave the shell
  :clear            Clear the screen
  :history          Show recent commands
  !<command>        Run a system command

Anything else runs as a zabbix-dna command, e.g. 'host list --limit 10'.
Use '<command> --help' for command options.";

/// What the shell does with one input line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Help,
    Quit,
    Clear,
    History,
    System(&'a str),
    Command(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    let line = line.trim();
    match line {
        "" => Input::Empty,
        ":help" | ":h" | ":?" => Input::Help,
        ":q" | ":exit" | "exit" | "quit" => Input::Quit,
        ":clear" => Input::Clear,
        ":history" => Input::History,
        _ => match line.strip_prefix('!') {
            Some(cmd) => Input::System(cmd.trim()),
            None => Input::Command(line),
        },
    }
}

/// Run shell until `:q`, `exit` or end of input
pub async fn run_shell(globals: &Globals) -> Result<(), CliError> {
    let config = Config::load(&Config::resolve_path(globals.config.as_deref())).ok();
    let format = globals
        .format
        .map(OutputFormat::from)
        .or_else(|| config.as_ref().map(|c| c.app.output.format))
        .unwrap_or_default();
    let formatter = get_formatter(format);

    let mut history = match config.as_ref().filter(|c| c.app.history) {
        Some(config) => match History::load(config.app.history_path()).await {
            Ok(history) => Some(history),
            Err(e) => {
                warn!("history disabled: {}", e);
                None
            }
        },
        None => None,
    };

    println!("zabbix-dna {} interactive shell. Type :help for help, :q to quit.", env!("CARGO_PKG_VERSION"));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let input = classify(&line);
        if !matches!(input, Input::Empty) {
            if let Some(history) = history.as_mut() {
                if let Err(e) = history.append(line.trim()).await {
                    debug!("history append failed: {}", e);
                }
            }
        }

        match input {
            Input::Empty => {}
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Clear => {
                crossterm::execute!(std::io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
            }
            Input::History => match history.as_ref() {
                Some(history) => {
                    for (n, entry) in history.recent(HISTORY_SHOWN).iter().enumerate() {
                        println!("{:>4}  {}", n + 1, entry);
                    }
                }
                None => println!("History is disabled."),
            },
            Input::System(cmd) => {
                if let Err(e) = run_system(cmd).await {
                    eprintln!("{}", formatter.format_error(&e.to_string()));
                }
            }
            Input::Command(cmd) => {
                if let Err(e) = run_line(cmd, globals).await {
                    eprintln!("{}", formatter.format_error(&e.to_string()));
                }
            }
        }
    }

    Ok(())
}

async fn run_system(cmd: &str) -> Result<(), CliError> {
    if cmd.is_empty() {
        return Err(CliError::InvalidArgument("no system command given".to_string()));
    }

    #[cfg(windows)]
    let status = tokio::process::Command::new("cmd").arg("/C").arg(cmd).status().await?;
    #[cfg(not(windows))]
    let status = tokio::process::Command::new("sh").arg("-c").arg(cmd).status().await?;

    if !status.success() {
        println!("({})", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("   "), Input::Empty);
        assert_eq!(classify(":?"), Input::Help);
        assert_eq!(classify("quit"), Input::Quit);
        assert_eq!(classify(":exit"), Input::Quit);
        assert_eq!(classify(":history"), Input::History);
        assert_eq!(classify("!ls -la"), Input::System("ls -la"));
        assert_eq!(
            classify("  host list --limit 5 "),
            Input::Command("host list --limit 5")
        );
    }

    #[tokio::test]
    async fn test_empty_system_command() {
        assert!(run_system("").await.is_err());
    }
}
