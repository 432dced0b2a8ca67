//! SaltStack integration through salt-api.
//!
//! Used to run modules on Zabbix proxies and to roll out the agent.

pub mod client;

pub use client::{SaltClient, SaltJob, TargetType};

use crate::error::SaltError;
use crate::text::split_words;

/// Operating systems with a known agent rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentOs {
    Linux,
    Windows,
}

/// Module calls that install the agent binary and restart the service, in order.
pub fn deploy_agent_steps(os: AgentOs) -> &'static [&'static str] {
    match os {
        AgentOs::Linux => &[
            "file.mkdir /opt/dimo/",
            "cmd.run 'curl -o /opt/dimo/zabbix_agent_dimo https://repo.dimo.com/zabbix/agent_linux'",
            "cmd.run 'chmod +x /opt/dimo/zabbix_agent_dimo'",
            "service.restart zabbix-agent2",
        ],
        AgentOs::Windows => &[
            r"file.mkdir C:\\Dimo\\",
            r"cmd.run 'powershell Invoke-WebRequest -Uri https://repo.dimo.com/zabbix/agent_win -OutFile C:\Dimo\zabbix_agent_dimo.exe'",
            "service.restart zabbix-agent2",
        ],
    }
}

/// Split `cmd.run 'ls -la'` into the function name and its arguments.
pub fn parse_command(command: &str) -> Result<(String, Vec<String>), SaltError> {
    let mut words = split_words(command)
        .ok_or_else(|| SaltError::InvalidCommand(format!("unterminated quote in '{}'", command)))?
        .into_iter();

    let fun = words
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| SaltError::InvalidCommand("empty command".to_string()))?;

    if !fun.contains('.') {
        return Err(SaltError::InvalidCommand(format!(
            "'{}' is not a module function (expected module.function)",
            fun
        )));
    }

    Ok((fun, words.collect()))
}
