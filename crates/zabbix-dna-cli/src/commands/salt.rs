//! SaltStack commands for Zabbix proxies.

use std::time::Duration;

use serde::Serialize;
use zabbix_dna_core::salt::{deploy_agent_steps, parse_command, SaltClient, SaltJob};

use crate::cli::{SaltArgs, SaltCommands, SaltTargetArgs};
use crate::context::Context;
use crate::error::{CliError, SaltError};
use crate::output::Listing;

/// Run salt command
pub async fn run_salt(args: SaltArgs, ctx: &Context) -> Result<(), CliError> {
    let client = connect(ctx).await?;

    match args.command {
        SaltCommands::Ping(target) => {
            let job = publish(&client, &target, "test.ping", &[]).await?;
            ctx.emit(&job_listing(vec![JobRow::new("test.ping", &job)]));
            Ok(())
        }
        SaltCommands::Run(args) => {
            let (fun, fun_args) = parse_command(&args.command.join(" "))?;
            let job = publish(&client, &args.target, &fun, &fun_args).await?;
            ctx.emit(&job_listing(vec![JobRow::new(&fun, &job)]));
            Ok(())
        }
        SaltCommands::DeployAgent(args) => {
            let mut rows = Vec::new();
            for step in deploy_agent_steps(args.os.into()) {
                let (fun, fun_args) = parse_command(step)?;
                match publish(&client, &args.target, &fun, &fun_args).await {
                    Ok(job) => rows.push(JobRow::new(step, &job)),
                    Err(e) => {
                        ctx.emit(&job_listing(rows));
                        return Err(CliError::Other(format!("deploy step '{}' failed: {}", step, e)));
                    }
                }
            }
            ctx.emit(&job_listing(rows));
            Ok(())
        }
    }
}

async fn connect(ctx: &Context) -> Result<SaltClient, CliError> {
    let salt = &ctx.config.salt;
    let timeout = (ctx.config.api.timeout > 0).then(|| Duration::from_secs(ctx.config.api.timeout));
    let mut client = SaltClient::new(&salt.url, timeout)?;

    match (salt.user.as_deref(), salt.password.as_deref()) {
        (Some(user), Some(password)) if !user.is_empty() => {
            client.login(user, password, &salt.eauth).await?;
            Ok(client)
        }
        _ => Err(CliError::InvalidArgument(
            "salt-api credentials missing: set [salt] user and password".to_string(),
        )),
    }
}

async fn publish(
    client: &SaltClient,
    target: &SaltTargetArgs,
    fun: &str,
    args: &[String],
) -> Result<SaltJob, SaltError> {
    client
        .publish(&target.target, target.target_type.into(), fun, args)
        .await
}

#[derive(Debug, Serialize)]
struct JobRow {
    function: String,
    jid: String,
    minions: Vec<String>,
}

impl JobRow {
    fn new(function: &str, job: &SaltJob) -> Self {
        Self {
            function: function.to_string(),
            jid: job.jid.clone(),
            minions: job.minions.clone(),
        }
    }
}

fn job_listing(rows: Vec<JobRow>) -> Listing {
    Listing::new("jobs", &["Function", "Job ID", "Minions"], &rows, |r| {
        vec![r.function.clone(), r.jid.clone(), r.minions.join(", ")]
    })
}
