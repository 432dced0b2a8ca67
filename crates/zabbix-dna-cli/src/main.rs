//! zabbix-dna - command-line client for the Zabbix JSON-RPC API.
//!
//! CRUD commands for the common Zabbix objects, batch files, an interactive
//! shell and menu, SaltStack helpers for proxies, and an exporter that
//! re-publishes Zabbix data over OTLP.

mod cli;
mod commands;
mod context;
mod error;
mod logging;
mod output;

use std::future::Future;
use std::pin::Pin;

use clap::Parser;
use zabbix_dna_core::Config;

use cli::{Cli, Commands};
use context::{Context, Globals};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let globals = Globals::from(&cli);

    // Logging settings come from the config when it is readable
    let config = Config::load(&Config::resolve_path(globals.config.as_deref())).ok();
    logging::init(globals.verbose, config.as_ref().map(|c| &c.logging));

    let result = run(cli, globals).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli, globals: Globals) -> Result<(), CliError> {
    if let Some(path) = cli.batch {
        return commands::run_batch(&path, &globals).await;
    }

    match cli.command {
        Some(command) => dispatch(command, &globals).await,
        None => commands::run_menu(&globals).await,
    }
}

/// Run one parsed command.
pub async fn dispatch(command: Commands, globals: &Globals) -> Result<(), CliError> {
    match command {
        Commands::Host(args) => commands::run_host(args, &Context::load(globals)?).await,
        Commands::Hostgroup(args) => commands::run_hostgroup(args, &Context::load(globals)?).await,
        Commands::Template(args) => commands::run_template(args, &Context::load(globals)?).await,
        Commands::Templategroup(args) => {
            commands::run_templategroup(args, &Context::load(globals)?).await
        }
        Commands::Proxy(args) => commands::run_proxy(args, &Context::load(globals)?).await,
        Commands::User(args) => commands::run_user(args, &Context::load(globals)?).await,
        Commands::Usergroup(args) => commands::run_usergroup(args, &Context::load(globals)?).await,
        Commands::Item(args) => commands::run_item(args, &Context::load(globals)?).await,
        Commands::Trigger(args) => commands::run_trigger(args, &Context::load(globals)?).await,
        Commands::Problem(args) => commands::run_problem(args, &Context::load(globals)?).await,
        Commands::Maintenance(args) => {
            commands::run_maintenance(args, &Context::load(globals)?).await
        }
        Commands::Monitoring(args) => commands::run_monitoring(args, &Context::load(globals)?).await,
        Commands::Macro(args) => commands::run_macro(args, &Context::load(globals)?).await,
        Commands::Hostinterface(args) => {
            commands::run_hostinterface(args, &Context::load(globals)?).await
        }
        Commands::Media(args) => commands::run_media(args, &Context::load(globals)?).await,
        Commands::Action(args) => commands::run_action(args, &Context::load(globals)?).await,
        Commands::Script(args) => commands::run_script(args, &Context::load(globals)?).await,
        Commands::Export(args) => commands::run_export(args, &Context::load(globals)?).await,
        Commands::Backup(args) => commands::run_backup(args, &Context::load(globals)?).await,
        Commands::Exporter(args) => commands::run_exporter(args, &Context::load(globals)?).await,
        Commands::Salt(args) => commands::run_salt(args, &Context::load(globals)?).await,
        Commands::TestApi => commands::run_test_api(&Context::load(globals)?).await,
        Commands::Version => commands::run_version(globals).await,
        Commands::Init(args) => commands::run_init(args, globals),
        Commands::Wizard => commands::run_wizard(globals),
        Commands::Gui => commands::run_menu(globals).await,
        Commands::Shell => commands::run_shell(globals).await,
    }
}

/// Boxed [`dispatch`] for commands that run other commands.
pub fn dispatch_boxed(
    command: Commands,
    globals: Globals,
) -> Pin<Box<dyn Future<Output = Result<(), CliError>>>> {
    Box::pin(async move { dispatch(command, &globals).await })
}
