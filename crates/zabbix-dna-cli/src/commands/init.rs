//! `init`: write a minimal config file.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use zabbix_dna_core::config::{Config, DEFAULT_CONFIG_FILE};

use crate::cli::InitArgs;
use crate::context::Globals;
use crate::error::CliError;

use super::wizard::ask_api;

/// Run init command
pub fn run_init(args: InitArgs, globals: &Globals) -> Result<(), CliError> {
    let path = args
        .output
        .or_else(|| globals.config.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    init_config(&path, args.force, &mut stdin.lock(), &mut stdout)?;

    println!("Configuration written to {}", path.display());
    Ok(())
}

fn init_config<R: BufRead, W: Write>(
    path: &Path,
    force: bool,
    input: &mut R,
    output: &mut W,
) -> Result<Config, CliError> {
    if path.exists() && !force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let mut config = Config::default();
    ask_api(input, output, &mut config)?;
    config.save(path)?;
    Ok(config)
}
