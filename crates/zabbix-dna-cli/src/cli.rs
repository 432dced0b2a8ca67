//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use zabbix_dna_core::config::OutputFormat;
use zabbix_dna_core::salt::{AgentOs, TargetType};

/// zabbix-dna - command-line client for the Zabbix API
#[derive(Parser, Debug)]
#[command(name = "zabbix-dna")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file [default: zabbix-dna.toml]
    #[arg(short, long, global = true, env = "ZABBIX_DNA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format [default: from config]
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// Run commands from a file, one per line
    #[arg(long, value_name = "FILE")]
    pub batch: Option<PathBuf>,

    /// HTTP timeout in seconds, overrides the config
    #[arg(long, global = true, env = "ZABBIX_DNA_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exit non-zero when any batch line fails
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage hosts
    #[command(alias = "hosts")]
    Host(HostArgs),

    /// Manage host groups
    #[command(alias = "hostgroups")]
    Hostgroup(HostgroupArgs),

    /// Manage templates
    #[command(alias = "templates")]
    Template(TemplateArgs),

    /// Manage template groups
    Templategroup(TemplategroupArgs),

    /// Manage proxies
    Proxy(ProxyArgs),

    /// Manage users
    #[command(alias = "users")]
    User(UserArgs),

    /// Manage user groups
    Usergroup(UsergroupArgs),

    /// Manage items
    Item(ItemArgs),

    /// Manage triggers
    Trigger(TriggerArgs),

    /// Problems, events and alarms
    #[command(alias = "problems")]
    Problem(ProblemArgs),

    /// Manage maintenance periods
    Maintenance(MaintenanceArgs),

    /// Per-host monitoring data
    Monitoring(MonitoringArgs),

    /// User macros
    Macro(MacroArgs),

    /// Host interfaces
    Hostinterface(HostinterfaceArgs),

    /// Media types
    Media(MediaArgs),

    /// Actions
    Action(ActionArgs),

    /// Global scripts
    Script(ScriptArgs),

    /// Export configuration as JSON
    Export(ExportArgs),

    /// Full configuration backup
    Backup(BackupArgs),

    /// Re-export Zabbix data over OTLP
    Exporter(ExporterArgs),

    /// SaltStack integration for proxies
    Salt(SaltArgs),

    /// Check API connectivity
    TestApi,

    /// Show client and API version
    Version,

    /// Create a minimal config file
    Init(InitArgs),

    /// Interactive configuration wizard
    Wizard,

    /// Interactive menu
    #[command(alias = "tui")]
    Gui,

    /// Interactive shell
    #[command(alias = "repl")]
    Shell,
}

// ==================== Shared ====================

#[derive(Args, Debug, Clone)]
pub struct NameArgs {
    /// Object name
    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    /// Maximum rows
    #[arg(short, long, default_value_t = 100)]
    pub limit: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeverityArg {
    NotClassified,
    Information,
    Warning,
    Average,
    High,
    Disaster,
}

impl SeverityArg {
    pub fn code(self) -> u8 {
        match self {
            SeverityArg::NotClassified => 0,
            SeverityArg::Information => 1,
            SeverityArg::Warning => 2,
            SeverityArg::Average => 3,
            SeverityArg::High => 4,
            SeverityArg::Disaster => 5,
        }
    }
}

// ==================== Host ====================

#[derive(Args, Debug)]
pub struct HostArgs {
    #[command(subcommand)]
    pub command: HostCommands,
}

#[derive(Subcommand, Debug)]
pub enum HostCommands {
    /// List hosts
    #[command(alias = "show_hosts")]
    List(HostListArgs),

    /// Show host details
    #[command(alias = "show_host")]
    Show(NameArgs),

    /// Create a host
    #[command(alias = "create_host")]
    Create(HostCreateArgs),

    /// Update a host
    #[command(alias = "update_host")]
    Update(HostUpdateArgs),

    /// Delete a host
    #[command(alias = "remove_host")]
    Delete(NameArgs),

    /// Create a copy of a host
    #[command(alias = "clone_host")]
    Clone(HostCloneArgs),

    /// Enable monitoring of a host
    Enable(NameArgs),

    /// Disable monitoring of a host
    Disable(NameArgs),
}

#[derive(Args, Debug)]
pub struct HostListArgs {
    /// Maximum rows
    #[arg(short, long, default_value_t = 100)]
    pub limit: usize,

    /// Substring to match against host names
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct HostCreateArgs {
    /// Technical host name
    pub name: String,

    /// Host group ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub groupid: Vec<String>,

    /// Host group names (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub hostgroup: Vec<String>,

    /// Agent interface address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub ip: String,

    /// Do not create an agent interface
    #[arg(long)]
    pub no_interface: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostStatusArg {
    Enabled,
    Disabled,
}

impl HostStatusArg {
    pub fn code(self) -> u8 {
        match self {
            HostStatusArg::Enabled => 0,
            HostStatusArg::Disabled => 1,
        }
    }
}

#[derive(Args, Debug)]
pub struct HostUpdateArgs {
    /// Technical host name
    pub name: String,

    /// Monitoring status
    #[arg(short, long, value_enum)]
    pub status: Option<HostStatusArg>,

    /// New visible name
    #[arg(short = 'n', long = "name")]
    pub visible_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct HostCloneArgs {
    /// Source host name
    pub name: String,

    /// Name of the new host
    #[arg(short = 'n', long)]
    pub new_name: String,
}

// ==================== Host groups ====================

#[derive(Args, Debug)]
pub struct HostgroupArgs {
    #[command(subcommand)]
    pub command: HostgroupCommands,
}

#[derive(Subcommand, Debug)]
pub enum HostgroupCommands {
    /// List host groups
    #[command(alias = "show_hostgroups")]
    List,

    /// Show hosts in a group
    #[command(alias = "show_hostgroup")]
    Show(NameArgs),

    /// Create a host group
    #[command(alias = "create_hostgroup")]
    Create(NameArgs),

    /// Delete a host group
    #[command(alias = "remove_hostgroup")]
    Delete(NameArgs),

    /// Add hosts to groups
    #[command(alias = "add_host_to_hostgroup")]
    AddHost(MembershipArgs),

    /// Remove hosts from groups
    #[command(alias = "remove_host_from_hostgroup")]
    RemoveHost(MembershipArgs),

    /// Show user group permissions on host groups
    #[command(alias = "show_hostgroup_permissions")]
    Permissions(PermissionsArgs),
}

#[derive(Args, Debug)]
pub struct MembershipArgs {
    /// Host names (comma-separated)
    pub hosts: String,

    /// Host group names (comma-separated)
    pub groups: String,
}

#[derive(Args, Debug)]
pub struct PermissionsArgs {
    /// Host group names (comma-separated)
    pub groups: String,
}

// ==================== Templates ====================

#[derive(Args, Debug)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub command: TemplateCommands,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List templates
    #[command(alias = "show_templates")]
    List(LimitArgs),

    /// Show template details
    #[command(alias = "show_template")]
    Show(NameArgs),

    /// Delete a template
    #[command(alias = "remove_template")]
    Delete(NameArgs),
}

#[derive(Args, Debug)]
pub struct TemplategroupArgs {
    #[command(subcommand)]
    pub command: TemplategroupCommands,
}

#[derive(Subcommand, Debug)]
pub enum TemplategroupCommands {
    /// List template groups
    #[command(alias = "show_templategroups")]
    List,

    /// Create a template group
    #[command(alias = "create_templategroup")]
    Create(NameArgs),

    /// Delete a template group
    #[command(alias = "remove_templategroup")]
    Delete(NameArgs),
}

// ==================== Proxies ====================

#[derive(Args, Debug)]
pub struct ProxyArgs {
    #[command(subcommand)]
    pub command: ProxyCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProxyCommands {
    /// List proxies
    #[command(alias = "show_proxies")]
    List,
}

// ==================== Users ====================

#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    #[command(alias = "show_users")]
    List,

    /// Show user details
    #[command(alias = "show_user")]
    Show(NameArgs),

    /// Create a user
    #[command(alias = "create_user")]
    Create(UserCreateArgs),

    /// Delete a user
    #[command(alias = "remove_user")]
    Delete(NameArgs),
}

#[derive(Args, Debug)]
pub struct UserCreateArgs {
    pub username: String,

    /// Initial password
    #[arg(short, long)]
    pub password: String,

    /// Role id
    #[arg(short, long, default_value = "1")]
    pub roleid: String,

    /// User group ids (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub groupid: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UsergroupArgs {
    #[command(subcommand)]
    pub command: UsergroupCommands,
}

#[derive(Subcommand, Debug)]
pub enum UsergroupCommands {
    /// List user groups
    #[command(alias = "show_usergroups")]
    List,

    /// Delete a user group
    #[command(alias = "remove_usergroup")]
    Delete(NameArgs),
}

// ==================== Items & triggers ====================

#[derive(Args, Debug)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub command: ItemCommands,
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List items
    #[command(alias = "show_items")]
    List(HostFilterLimitArgs),

    /// Create an item
    #[command(alias = "create_item")]
    Create(ItemCreateArgs),
}

#[derive(Args, Debug)]
pub struct HostFilterLimitArgs {
    /// Only objects of this host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Maximum rows
    #[arg(short, long, default_value_t = 100)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ItemCreateArgs {
    /// Item name
    pub name: String,

    /// Host the item belongs to
    #[arg(short = 'H', long)]
    pub host: String,

    /// Item key
    #[arg(short, long)]
    pub key: String,

    /// Item type (0 = Zabbix agent, 2 = trapper, ...)
    #[arg(long = "type", default_value_t = 0)]
    pub item_type: u32,

    /// Value type (0 = float, 3 = unsigned, 4 = text, ...)
    #[arg(long, default_value_t = 3)]
    pub value_type: u32,

    /// Interface id; the host's main interface is used when omitted
    #[arg(long)]
    pub interfaceid: Option<String>,

    /// Update interval
    #[arg(short, long, default_value = "1m")]
    pub delay: String,

    /// Value units
    #[arg(short, long)]
    pub units: Option<String>,
}

#[derive(Args, Debug)]
pub struct TriggerArgs {
    #[command(subcommand)]
    pub command: TriggerCommands,
}

#[derive(Subcommand, Debug)]
pub enum TriggerCommands {
    /// List triggers
    #[command(alias = "show_triggers")]
    List(HostFilterLimitArgs),

    /// Create a trigger
    #[command(alias = "create_trigger")]
    Create(TriggerCreateArgs),
}

#[derive(Args, Debug)]
pub struct TriggerCreateArgs {
    /// Trigger name
    pub description: String,

    /// Trigger expression
    #[arg(short, long)]
    pub expression: String,

    /// Severity
    #[arg(short, long, value_enum, default_value = "average")]
    pub priority: SeverityArg,
}

// ==================== Problems ====================

#[derive(Args, Debug)]
pub struct ProblemArgs {
    #[command(subcommand)]
    pub command: ProblemCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProblemCommands {
    /// List recent problems
    #[command(alias = "show_problems")]
    List(ProblemListArgs),

    /// Acknowledge events
    #[command(alias = "acknowledge_event")]
    Acknowledge(AckArgs),

    /// Acknowledge the last event of triggers
    #[command(alias = "acknowledge_trigger_last_event")]
    AcknowledgeTrigger(AckArgs),

    /// List events
    #[command(alias = "show_events")]
    Events(EventsArgs),

    /// List triggers in problem state
    #[command(alias = "show_alarms")]
    Alarms(AlarmsArgs),
}

#[derive(Args, Debug)]
pub struct ProblemListArgs {
    /// Maximum rows
    #[arg(short, long, default_value_t = 50)]
    pub limit: usize,

    /// Only these severities (repeatable)
    #[arg(short, long, value_enum)]
    pub severity: Vec<SeverityArg>,
}

#[derive(Args, Debug)]
pub struct AckArgs {
    /// Event or trigger ids (comma-separated)
    #[arg(required = true, value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Acknowledge message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Close the problem as well
    #[arg(long)]
    pub close: bool,
}

#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Trigger ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub trigger_id: Vec<String>,

    /// Host group names (comma-separated)
    #[arg(long)]
    pub hostgroup: Option<String>,

    /// Host names (comma-separated)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Maximum rows
    #[arg(short, long, default_value_t = 50)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct AlarmsArgs {
    /// Substring of the trigger name
    #[arg(short, long)]
    pub description: Option<String>,

    /// Minimum severity
    #[arg(short, long, value_enum)]
    pub priority: Option<SeverityArg>,

    /// Host group names (comma-separated)
    #[arg(long)]
    pub hostgroup: Option<String>,

    /// Only alarms whose last event is unacknowledged
    #[arg(long)]
    pub unack: bool,
}

// ==================== Maintenance ====================

#[derive(Args, Debug)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    pub command: MaintenanceCommands,
}

#[derive(Subcommand, Debug)]
pub enum MaintenanceCommands {
    /// List maintenance periods
    #[command(alias = "show_maintenance_definitions")]
    List,

    /// Create a maintenance period
    #[command(alias = "create_maintenance_definition")]
    Create(MaintenanceCreateArgs),

    /// Delete a maintenance period by name
    Delete(NameArgs),

    /// Delete maintenance periods by id
    #[command(alias = "remove_maintenance_definition")]
    Remove(IdsArgs),
}

#[derive(Args, Debug)]
pub struct MaintenanceCreateArgs {
    pub name: String,

    /// Host names (comma-separated)
    #[arg(short = 'H', long, value_delimiter = ',')]
    pub host: Vec<String>,

    /// Host group names (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub hostgroup: Vec<String>,

    /// Start, "YYYY-MM-DD HH:MM" or Unix time [default: now]
    #[arg(long)]
    pub since: Option<String>,

    /// End, "YYYY-MM-DD HH:MM" or Unix time [default: since + period]
    #[arg(long)]
    pub till: Option<String>,

    /// Length of the maintenance window
    #[arg(short, long, default_value = "1h")]
    pub period: String,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct IdsArgs {
    /// Ids (comma-separated)
    #[arg(required = true, value_delimiter = ',')]
    pub ids: Vec<String>,
}

// ==================== Monitoring ====================

#[derive(Args, Debug)]
pub struct MonitoringArgs {
    #[command(subcommand)]
    pub command: MonitoringCommands,
}

#[derive(Subcommand, Debug)]
pub enum MonitoringCommands {
    /// Items of a host
    Items(HostNameArgs),

    /// Search items by name
    Item(NameArgs),

    /// Latest values of a host
    #[command(alias = "last_values")]
    LastValues(HostNameArgs),

    /// Triggers of a host
    Triggers(HostNameArgs),

    /// Recent events of a host
    Events(MonitoringEventsArgs),

    /// Graphs of a host
    Graphs(HostNameArgs),
}

#[derive(Args, Debug)]
pub struct HostNameArgs {
    /// Host name
    pub host: String,
}

#[derive(Args, Debug)]
pub struct MonitoringEventsArgs {
    /// Host name
    pub host: String,

    /// Maximum rows
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

// ==================== Misc objects ====================

#[derive(Args, Debug)]
pub struct MacroArgs {
    #[command(subcommand)]
    pub command: MacroCommands,
}

#[derive(Subcommand, Debug)]
pub enum MacroCommands {
    /// List host, template or global macros
    #[command(alias = "show_usermacros")]
    List(MacroListArgs),
}

#[derive(Args, Debug)]
pub struct MacroListArgs {
    /// Host name
    #[arg(short = 'H', long, conflicts_with = "template")]
    pub host: Option<String>,

    /// Template name
    #[arg(short, long)]
    pub template: Option<String>,
}

#[derive(Args, Debug)]
pub struct HostinterfaceArgs {
    #[command(subcommand)]
    pub command: HostinterfaceCommands,
}

#[derive(Subcommand, Debug)]
pub enum HostinterfaceCommands {
    /// List host interfaces
    List(HostFilterArgs),
}

#[derive(Args, Debug)]
pub struct HostFilterArgs {
    /// Only interfaces of this host
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

#[derive(Args, Debug)]
pub struct MediaArgs {
    #[command(subcommand)]
    pub command: MediaCommands,
}

#[derive(Subcommand, Debug)]
pub enum MediaCommands {
    /// List media types
    #[command(alias = "type_list")]
    TypeList,
}

#[derive(Args, Debug)]
pub struct ActionArgs {
    #[command(subcommand)]
    pub command: ActionCommands,
}

#[derive(Subcommand, Debug)]
pub enum ActionCommands {
    /// List actions
    List,
}

#[derive(Args, Debug)]
pub struct ScriptArgs {
    #[command(subcommand)]
    pub command: ScriptCommands,
}

#[derive(Subcommand, Debug)]
pub enum ScriptCommands {
    /// List global scripts
    List,

    /// Run a global script on a host
    Execute(ScriptExecuteArgs),
}

#[derive(Args, Debug)]
pub struct ScriptExecuteArgs {
    /// Script id
    pub scriptid: String,

    /// Target host name
    #[arg(short = 'H', long, required_unless_present = "hostid")]
    pub host: Option<String>,

    /// Target host id
    #[arg(long, conflicts_with = "host")]
    pub hostid: Option<String>,
}

// ==================== Export & backup ====================

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub command: ExportCommands,
}

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export a host
    Host(ExportTargetArgs),

    /// Export a template
    Template(ExportTargetArgs),
}

#[derive(Args, Debug)]
pub struct ExportTargetArgs {
    /// Object name
    pub name: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Directory for the backup file
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

// ==================== Exporter ====================

#[derive(Args, Debug)]
pub struct ExporterArgs {
    #[command(subcommand)]
    pub command: ExporterCommands,
}

#[derive(Subcommand, Debug)]
pub enum ExporterCommands {
    /// Export numeric item values as OTLP metrics
    Metrics(ExporterRunArgs),

    /// Export problems as OTLP traces
    Traces(ExporterRunArgs),
}

#[derive(Args, Debug)]
pub struct ExporterRunArgs {
    /// Polling interval (e.g. 30s, 5m)
    #[arg(short, long, default_value = "60s")]
    pub interval: String,

    /// OTLP/HTTP collector endpoint [default: from config]
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

// ==================== Salt ====================

#[derive(Args, Debug)]
pub struct SaltArgs {
    #[command(subcommand)]
    pub command: SaltCommands,
}

#[derive(Subcommand, Debug)]
pub enum SaltCommands {
    /// Ping minions
    Ping(SaltTargetArgs),

    /// Run a module function on minions
    Run(SaltRunArgs),

    /// Deploy the Zabbix agent to minions
    #[command(alias = "deploy_agent")]
    DeployAgent(SaltDeployArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetTypeArg {
    Glob,
    List,
    Pcre,
    Grain,
}

impl From<TargetTypeArg> for TargetType {
    fn from(t: TargetTypeArg) -> Self {
        match t {
            TargetTypeArg::Glob => TargetType::Glob,
            TargetTypeArg::List => TargetType::List,
            TargetTypeArg::Pcre => TargetType::Pcre,
            TargetTypeArg::Grain => TargetType::Grain,
        }
    }
}

#[derive(Args, Debug)]
pub struct SaltTargetArgs {
    /// Target minions
    #[arg(short, long, default_value = "*")]
    pub target: String,

    /// Target type
    #[arg(short = 'T', long = "type", value_enum, default_value = "glob")]
    pub target_type: TargetTypeArg,
}

#[derive(Args, Debug)]
pub struct SaltRunArgs {
    /// Function and arguments, e.g. cmd.run 'uptime'
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub command: Vec<String>,

    #[command(flatten)]
    pub target: SaltTargetArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsArg {
    Linux,
    Windows,
}

impl From<OsArg> for AgentOs {
    fn from(os: OsArg) -> Self {
        match os {
            OsArg::Linux => AgentOs::Linux,
            OsArg::Windows => AgentOs::Windows,
        }
    }
}

#[derive(Args, Debug)]
pub struct SaltDeployArgs {
    #[command(flatten)]
    pub target: SaltTargetArgs,

    /// Operating system of the minions
    #[arg(short, long, value_enum, default_value = "linux")]
    pub os: OsArg,
}

// ==================== Setup ====================

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the config [default: zabbix-dna.toml]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_legacy_alias() {
        let cli = Cli::try_parse_from(["zabbix-dna", "host", "show_hosts", "--limit", "5"]).unwrap();
        match cli.command {
            Some(Commands::Host(HostArgs {
                command: HostCommands::List(args),
            })) => assert_eq!(args.limit, 5),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["zabbix-dna", "problem", "list", "-f", "json", "-c", "x.toml"]).unwrap();
        assert_eq!(cli.format, Some(FormatArg::Json));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["zabbix-dna"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_salt_run_collects_words() {
        let cli = Cli::try_parse_from(["zabbix-dna", "salt", "run", "cmd.run", "uptime", "-t", "proxy*"]).unwrap();
        match cli.command {
            Some(Commands::Salt(SaltArgs {
                command: SaltCommands::Run(args),
            })) => {
                assert_eq!(args.command, vec!["cmd.run", "uptime"]);
                assert_eq!(args.target.target, "proxy*");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
