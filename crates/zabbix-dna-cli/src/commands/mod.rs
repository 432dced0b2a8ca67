//! Command implementations.

pub mod action;
pub mod backup;
pub mod batch;
pub mod export;
pub mod exporter;
pub mod host;
pub mod hostgroup;
pub mod hostinterface;
pub mod init;
pub mod item;
pub mod macros;
pub mod maintenance;
pub mod media;
pub mod menu;
pub mod monitoring;
pub mod problem;
pub mod proxy;
pub mod salt;
pub mod script;
pub mod shell;
pub mod template;
pub mod test_api;
pub mod trigger;
pub mod user;
pub mod version;
pub mod wizard;

pub use action::run_action;
pub use backup::run_backup;
pub use batch::run_batch;
pub use export::run_export;
pub use exporter::run_exporter;
pub use host::run_host;
pub use hostgroup::run_hostgroup;
pub use hostinterface::run_hostinterface;
pub use init::run_init;
pub use item::run_item;
pub use macros::run_macro;
pub use maintenance::run_maintenance;
pub use media::run_media;
pub use menu::run_menu;
pub use monitoring::run_monitoring;
pub use problem::run_problem;
pub use proxy::run_proxy;
pub use salt::run_salt;
pub use script::run_script;
pub use shell::run_shell;
pub use template::{run_template, run_templategroup};
pub use test_api::run_test_api;
pub use trigger::run_trigger;
pub use user::{run_user, run_usergroup};
pub use version::run_version;
pub use wizard::run_wizard;

use clap::error::ErrorKind;
use clap::Parser;
use zabbix_dna_core::text::split_words;

use crate::cli::{Cli, Commands};
use crate::context::Globals;
use crate::error::CliError;

/// Parse one line of a batch file or shell session.
///
/// Returns `None` when clap only printed help or version text.
pub fn parse_line(line: &str) -> Result<Option<Cli>, CliError> {
    let mut words = split_words(line)
        .ok_or_else(|| CliError::InvalidArgument(format!("unterminated quote in '{}'", line)))?;
    if words.first().map(String::as_str) == Some("zabbix-dna") {
        words.remove(0);
    }

    let argv = std::iter::once("zabbix-dna".to_string()).chain(words);
    match Cli::try_parse_from(argv) {
        Ok(cli) => Ok(Some(cli)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{}", e);
            Ok(None)
        }
        Err(e) => Err(CliError::InvalidArgument(e.to_string().trim_end().to_string())),
    }
}

/// Run a command line from inside batch, shell or menu.
///
/// Interactive commands and nested batch files are refused.
pub async fn run_line(line: &str, outer: &Globals) -> Result<(), CliError> {
    let Some(cli) = parse_line(line)? else {
        return Ok(());
    };

    if cli.batch.is_some() {
        return Err(CliError::InvalidArgument(
            "--batch cannot be nested".to_string(),
        ));
    }

    let globals = outer.overlay(&Globals::from(&cli));
    match cli.command {
        Some(Commands::Shell | Commands::Gui | Commands::Wizard) => Err(CliError::InvalidArgument(
            "interactive commands cannot be nested".to_string(),
        )),
        Some(command) => crate::dispatch_boxed(command, globals).await,
        None => Err(CliError::InvalidArgument("no command given".to_string())),
    }
}

/// Collapse a multi-line message for one-line summaries.
pub(crate) fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_quoted_args() {
        let cli = parse_line("hostgroup create 'Linux servers' -f json").unwrap().unwrap();
        assert_eq!(cli.format, Some(crate::cli::FormatArg::Json));
        match cli.command {
            Some(Commands::Hostgroup(args)) => match args.command {
                crate::cli::HostgroupCommands::Create(n) => assert_eq!(n.name, "Linux servers"),
                other => panic!("unexpected: {:?}", other),
            },
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_line_accepts_program_name() {
        assert!(parse_line("zabbix-dna version").unwrap().is_some());
    }

    #[test]
    fn test_parse_line_errors() {
        assert!(matches!(
            parse_line("host show 'web01"),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_line("host frobnicate"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_nested_shell_is_refused() {
        let err = run_line("shell", &Globals::default()).await.unwrap_err();
        assert!(err.to_string().contains("cannot be nested"));
    }

    #[test]
    fn test_one_line() {
        assert_eq!(one_line("a\n  b\tc "), "a b c");
    }
}
