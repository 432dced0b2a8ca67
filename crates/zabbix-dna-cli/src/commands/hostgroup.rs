//! Host group commands.

use serde::Serialize;
use zabbix_dna_core::api::{resolve_id, resolve_some, Lookup};
use zabbix_dna_core::protocol::labels::permission_name;
use zabbix_dna_core::protocol::records::{HostGroup, UserGroup};
use zabbix_dna_core::protocol::response::first_id;
use zabbix_dna_core::protocol::Params;
use zabbix_dna_core::text::split_list;
use zabbix_dna_core::ZabbixClient;

use crate::cli::{HostgroupArgs, HostgroupCommands, MembershipArgs};
use crate::context::Context;
use crate::error::{ApiError, CliError};
use crate::output::Listing;

/// Run hostgroup command
pub async fn run_hostgroup(args: HostgroupArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        HostgroupCommands::List => {
            let groups: Vec<HostGroup> = client.get("hostgroup.get", Params::hostgroup_list()).await?;
            ctx.emit(&Listing::new("host groups", &["ID", "Name", "Hosts"], &groups, |g| {
                vec![g.groupid.clone(), g.name.clone(), g.hosts.len().to_string()]
            }));
            Ok(())
        }
        HostgroupCommands::Show(args) => {
            let groups: Vec<HostGroup> = client
                .get("hostgroup.get", Params::hostgroup_show(&args.name))
                .await?;
            let group = groups.into_iter().next().ok_or_else(|| ApiError::NotFound {
                kind: "host group",
                name: args.name.clone(),
            })?;
            ctx.emit(&Listing::new("hosts", &["ID", "Host", "Name"], &group.hosts, |h| {
                vec![h.hostid.clone(), h.host.clone(), h.name.clone()]
            }));
            Ok(())
        }
        HostgroupCommands::Create(args) => {
            let result = client.call("hostgroup.create", Params::name_only(&args.name)).await?;
            let groupid = first_id(&result, "groupids")?;
            ctx.report(&format!("Host group '{}' created (groupid {})", args.name, groupid), &result);
            Ok(())
        }
        HostgroupCommands::Delete(args) => {
            let groupid = resolve_id(&client, Lookup::HostGroup, &args.name).await?;
            let result = client.call("hostgroup.delete", Params::ids(&[groupid])).await?;
            ctx.report(&format!("Host group '{}' deleted", args.name), &result);
            Ok(())
        }
        HostgroupCommands::AddHost(args) => {
            let (hostids, groupids) = membership(&client, &args).await?;
            let result = client
                .call("hostgroup.massadd", Params::hostgroup_massadd(&groupids, &hostids))
                .await?;
            ctx.report(
                &format!("Added {} host(s) to {} group(s)", hostids.len(), groupids.len()),
                &result,
            );
            Ok(())
        }
        HostgroupCommands::RemoveHost(args) => {
            let (hostids, groupids) = membership(&client, &args).await?;
            let result = client
                .call("hostgroup.massremove", Params::hostgroup_massremove(&groupids, &hostids))
                .await?;
            ctx.report(
                &format!("Removed {} host(s) from {} group(s)", hostids.len(), groupids.len()),
                &result,
            );
            Ok(())
        }
        HostgroupCommands::Permissions(args) => {
            let names = split_list(&args.groups);
            let groups: Vec<HostGroup> = client
                .get("hostgroup.get", Params::lookup("groupid", "name", &names))
                .await?;
            if groups.is_empty() {
                return Err(ApiError::NotFound {
                    kind: "host group",
                    name: args.groups,
                }
                .into());
            }
            let usergroups: Vec<UserGroup> =
                client.get("usergroup.get", Params::usergroup_rights()).await?;

            let rows = permission_rows(&groups, &usergroups);
            ctx.emit(&Listing::new(
                "permissions",
                &["Host group", "User group", "Permission"],
                &rows,
                |r| vec![r.hostgroup.clone(), r.usergroup.clone(), r.permission.clone()],
            ));
            Ok(())
        }
    }
}

async fn membership(
    client: &ZabbixClient,
    args: &MembershipArgs,
) -> Result<(Vec<String>, Vec<String>), CliError> {
    let hostids = resolve_some(client, Lookup::Host, &split_list(&args.hosts)).await?;
    let groupids = resolve_some(client, Lookup::HostGroup, &split_list(&args.groups)).await?;
    Ok((hostids, groupids))
}

#[derive(Debug, Serialize)]
struct PermissionRow {
    hostgroup: String,
    usergroup: String,
    permission: String,
}

/// One row per (host group, user group) pair that carries a right.
fn permission_rows(groups: &[HostGroup], usergroups: &[UserGroup]) -> Vec<PermissionRow> {
    let mut rows = Vec::new();
    for group in groups {
        for usergroup in usergroups {
            for right in usergroup.rights.iter().filter(|r| r.id == group.groupid) {
                rows.push(PermissionRow {
                    hostgroup: group.name.clone(),
                    usergroup: usergroup.name.clone(),
                    permission: permission_name(&right.permission).to_string(),
                });
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use zabbix_dna_core::protocol::records::Right;

    #[test]
    fn test_permission_rows() {
        let groups = vec![HostGroup {
            groupid: "2".to_string(),
            name: "Linux servers".to_string(),
            ..Default::default()
        }];
        let usergroups = vec![
            UserGroup {
                usrgrpid: "7".to_string(),
                name: "Zabbix administrators".to_string(),
                rights: vec![Right {
                    id: "2".to_string(),
                    permission: "3".to_string(),
                }],
            },
            UserGroup {
                usrgrpid: "8".to_string(),
                name: "Guests".to_string(),
                rights: vec![Right {
                    id: "4".to_string(),
                    permission: "2".to_string(),
                }],
            },
        ];

        let rows = permission_rows(&groups, &usergroups);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].usergroup, "Zabbix administrators");
        assert_eq!(rows[0].permission, "Read-write");
    }
}
