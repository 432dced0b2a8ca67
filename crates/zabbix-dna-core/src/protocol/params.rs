//! Parameter builders for Zabbix API methods.
//!
//! Each builder returns the `params` value for one JSON-RPC call. The
//! method name travels next to it so call sites read like the API docs.

use serde_json::{json, Value};

use super::records::Host;

/// Rows pulled per exporter tick in metrics mode.
pub const EXPORTER_ITEM_LIMIT: usize = 100;

/// Rows pulled per exporter tick in traces mode.
pub const EXPORTER_PROBLEM_LIMIT: usize = 50;

/// Default agent port for newly created interfaces.
pub const DEFAULT_AGENT_PORT: &str = "10050";

/// event.acknowledge action bits
pub mod ack_action {
    pub const CLOSE: u32 = 1;
    pub const ACKNOWLEDGE: u32 = 2;
    pub const ADD_MESSAGE: u32 = 4;
}

fn id_objects(key: &str, ids: &[String]) -> Vec<Value> {
    ids.iter().map(|id| json!({ key: id })).collect()
}

/// Parameter builders, grouped by API object
pub struct Params;

impl Params {
    // ==================== Lookups ====================

    /// Find objects whose `field` equals one of `names`.
    pub fn lookup(id_field: &str, field: &str, names: &[String]) -> Value {
        json!({
            "output": [id_field, field],
            "filter": { field: names }
        })
    }

    // ==================== Exporter ====================

    /// Numeric items (float and unsigned) for the metrics exporter.
    pub fn exporter_items() -> Value {
        json!({
            "output": ["itemid", "hostid", "name", "key_", "lastvalue", "value_type", "units"],
            "selectHosts": ["name", "host"],
            "filter": { "value_type": ["0", "3"] },
            "monitored": true,
            "limit": EXPORTER_ITEM_LIMIT
        })
    }

    /// Most recent problems for the traces exporter.
    pub fn exporter_problems() -> Value {
        json!({
            "output": ["eventid", "objectid", "name", "severity", "clock", "r_eventid"],
            "selectTags": "extend",
            "recent": true,
            "sortfield": ["eventid"],
            "sortorder": "DESC",
            "limit": EXPORTER_PROBLEM_LIMIT
        })
    }

    // ==================== Hosts ====================

    pub fn host_list(limit: usize, search: Option<&str>) -> Value {
        let mut params = json!({
            "output": ["hostid", "host", "name", "status", "maintenance_status"],
            "selectInterfaces": ["ip", "available"],
            "sortfield": "name",
            "limit": limit
        });

        if let Some(term) = search {
            params["search"] = json!({ "host": term, "name": term });
            params["searchByAny"] = json!(true);
        }

        params
    }

    pub fn host_show(name: &str) -> Value {
        json!({
            "output": "extend",
            "filter": { "host": [name] },
            "selectHostGroups": "extend",
            "selectParentTemplates": ["templateid", "host", "name"],
            "selectInterfaces": "extend"
        })
    }

    pub fn host_create(name: &str, groupids: &[String], interface_ip: Option<&str>) -> Value {
        let mut params = json!({
            "host": name,
            "groups": id_objects("groupid", groupids)
        });

        if let Some(ip) = interface_ip {
            params["interfaces"] = json!([{
                "type": 1,
                "main": 1,
                "useip": 1,
                "ip": ip,
                "dns": "",
                "port": DEFAULT_AGENT_PORT
            }]);
        }

        params
    }

    pub fn host_update(hostid: &str, status: Option<u8>, visible_name: Option<&str>) -> Value {
        let mut params = json!({ "hostid": hostid });
        if let Some(status) = status {
            params["status"] = json!(status);
        }
        if let Some(name) = visible_name {
            params["name"] = json!(name);
        }
        params
    }

    /// host.create params copying groups, templates and interfaces of `source`.
    pub fn host_clone(source: &Host, new_name: &str) -> Value {
        let groups: Vec<Value> = source
            .groups
            .iter()
            .map(|g| json!({ "groupid": g.groupid }))
            .collect();
        let templates: Vec<Value> = source
            .templates
            .iter()
            .map(|t| json!({ "templateid": t.templateid }))
            .collect();
        let interfaces: Vec<Value> = source
            .interfaces
            .iter()
            .map(|i| {
                json!({
                    "type": i.kind,
                    "main": i.main,
                    "useip": i.useip,
                    "ip": i.ip,
                    "dns": i.dns,
                    "port": i.port
                })
            })
            .collect();

        json!({
            "host": new_name,
            "groups": groups,
            "templates": templates,
            "interfaces": interfaces
        })
    }

    pub fn ids(ids: &[String]) -> Value {
        json!(ids)
    }

    // ==================== Host groups ====================

    pub fn hostgroup_list() -> Value {
        json!({
            "output": ["groupid", "name"],
            "selectHosts": ["hostid"],
            "sortfield": "name"
        })
    }

    pub fn hostgroup_show(name: &str) -> Value {
        json!({
            "output": "extend",
            "filter": { "name": [name] },
            "selectHosts": ["hostid", "host", "name"]
        })
    }

    pub fn name_only(name: &str) -> Value {
        json!({ "name": name })
    }

    pub fn hostgroup_massadd(groupids: &[String], hostids: &[String]) -> Value {
        json!({
            "groups": id_objects("groupid", groupids),
            "hosts": id_objects("hostid", hostids)
        })
    }

    pub fn hostgroup_massremove(groupids: &[String], hostids: &[String]) -> Value {
        json!({
            "groupids": groupids,
            "hostids": hostids
        })
    }

    pub fn usergroup_rights() -> Value {
        json!({
            "output": ["usrgrpid", "name"],
            "selectHostGroupRights": "extend"
        })
    }

    // ==================== Templates ====================

    pub fn template_list(limit: usize) -> Value {
        json!({
            "output": ["templateid", "host", "name"],
            "selectItems": "count",
            "sortfield": "host",
            "limit": limit
        })
    }

    pub fn template_show(name: &str) -> Value {
        json!({
            "output": "extend",
            "filter": { "host": [name] },
            "selectTemplateGroups": ["groupid", "name"],
            "selectItems": "count"
        })
    }

    pub fn templategroup_list() -> Value {
        json!({
            "output": ["groupid", "name"],
            "sortfield": "name"
        })
    }

    // ==================== Proxies ====================

    pub fn proxy_list() -> Value {
        json!({
            "output": ["proxyid", "name", "operating_mode", "address", "version", "compatibility"],
            "sortfield": "name"
        })
    }

    // ==================== Users ====================

    pub fn user_list() -> Value {
        json!({
            "output": ["userid", "username", "name", "surname", "roleid"],
            "selectUsrgrps": ["usrgrpid", "name"],
            "sortfield": "username"
        })
    }

    pub fn user_show(username: &str) -> Value {
        json!({
            "output": "extend",
            "filter": { "username": [username] },
            "selectUsrgrps": ["usrgrpid", "name"],
            "selectMedias": ["mediatypeid", "sendto"]
        })
    }

    pub fn user_create(username: &str, password: &str, roleid: &str, groupids: &[String]) -> Value {
        json!({
            "username": username,
            "passwd": password,
            "roleid": roleid,
            "usrgrps": id_objects("usrgrpid", groupids)
        })
    }

    pub fn usergroup_list() -> Value {
        json!({
            "output": "extend",
            "selectHostGroupRights": "extend",
            "sortfield": "name"
        })
    }

    // ==================== Items & triggers ====================

    pub fn item_list(hostids: Option<&[String]>, limit: usize) -> Value {
        let mut params = json!({
            "output": ["itemid", "hostid", "name", "key_", "lastvalue", "units", "value_type"],
            "selectHosts": ["host", "name"],
            "sortfield": "name",
            "limit": limit
        });
        if let Some(ids) = hostids {
            params["hostids"] = json!(ids);
        }
        params
    }

    pub fn item_search(name: &str) -> Value {
        json!({
            "output": ["itemid", "hostid", "name", "key_", "lastvalue", "units", "value_type"],
            "selectHosts": ["host", "name"],
            "search": { "name": name },
            "sortfield": "name"
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn item_create(
        name: &str,
        key: &str,
        hostid: &str,
        item_type: u32,
        value_type: u32,
        interfaceid: Option<&str>,
        delay: &str,
        units: Option<&str>,
    ) -> Value {
        let mut params = json!({
            "name": name,
            "key_": key,
            "hostid": hostid,
            "type": item_type,
            "value_type": value_type,
            "delay": delay
        });
        if let Some(id) = interfaceid {
            params["interfaceid"] = json!(id);
        }
        if let Some(units) = units {
            params["units"] = json!(units);
        }
        params
    }

    pub fn trigger_list(hostids: Option<&[String]>, limit: usize) -> Value {
        let mut params = json!({
            "output": ["triggerid", "description", "priority", "value", "status", "lastchange"],
            "selectHosts": ["host", "name"],
            "expandDescription": true,
            "sortfield": "priority",
            "sortorder": "DESC",
            "limit": limit
        });
        if let Some(ids) = hostids {
            params["hostids"] = json!(ids);
        }
        params
    }

    pub fn trigger_create(description: &str, expression: &str, priority: u8) -> Value {
        json!({
            "description": description,
            "expression": expression,
            "priority": priority
        })
    }

    // ==================== Problems & events ====================

    pub fn problem_list(limit: usize, severities: &[u8]) -> Value {
        let mut params = json!({
            "output": "extend",
            "selectTags": "extend",
            "recent": true,
            "sortfield": ["eventid"],
            "sortorder": "DESC",
            "limit": limit
        });
        if !severities.is_empty() {
            params["severities"] = json!(severities);
        }
        params
    }

    pub fn acknowledge(eventids: &[String], message: &str, close: bool) -> Value {
        let mut action = ack_action::ACKNOWLEDGE | ack_action::ADD_MESSAGE;
        if close {
            action |= ack_action::CLOSE;
        }
        json!({
            "eventids": eventids,
            "action": action,
            "message": message
        })
    }

    /// Latest problem event raised by a trigger.
    pub fn last_event_for_trigger(triggerid: &str) -> Value {
        json!({
            "output": ["eventid"],
            "objectids": [triggerid],
            "source": 0,
            "object": 0,
            "value": 1,
            "sortfield": ["clock", "eventid"],
            "sortorder": "DESC",
            "limit": 1
        })
    }

    pub fn event_list(
        triggerids: Option<&[String]>,
        groupids: Option<&[String]>,
        hostids: Option<&[String]>,
        limit: usize,
    ) -> Value {
        let mut params = json!({
            "output": "extend",
            "selectHosts": ["host", "name"],
            "source": 0,
            "sortfield": ["clock", "eventid"],
            "sortorder": "DESC",
            "limit": limit
        });
        if let Some(ids) = triggerids {
            params["objectids"] = json!(ids);
        }
        if let Some(ids) = groupids {
            params["groupids"] = json!(ids);
        }
        if let Some(ids) = hostids {
            params["hostids"] = json!(ids);
        }
        params
    }

    /// Triggers currently in PROBLEM state.
    pub fn alarms(
        description: Option<&str>,
        min_priority: Option<u8>,
        groupids: Option<&[String]>,
        unacknowledged: bool,
    ) -> Value {
        let mut params = json!({
            "output": ["triggerid", "description", "priority", "value", "lastchange"],
            "selectHosts": ["host", "name"],
            "filter": { "value": 1 },
            "monitored": true,
            "expandDescription": true,
            "sortfield": "lastchange",
            "sortorder": "DESC"
        });
        if let Some(text) = description {
            params["search"] = json!({ "description": text });
        }
        if let Some(priority) = min_priority {
            params["min_severity"] = json!(priority);
        }
        if let Some(ids) = groupids {
            params["groupids"] = json!(ids);
        }
        if unacknowledged {
            params["withLastEventUnacknowledged"] = json!(true);
        }
        params
    }

    // ==================== Maintenance ====================

    pub fn maintenance_list() -> Value {
        json!({
            "output": "extend",
            "sortfield": "name"
        })
    }

    pub fn maintenance_create(
        name: &str,
        hostids: &[String],
        groupids: &[String],
        since: i64,
        till: i64,
        period_secs: u64,
        description: Option<&str>,
    ) -> Value {
        let mut params = json!({
            "name": name,
            "active_since": since,
            "active_till": till,
            "timeperiods": [{
                "timeperiod_type": 0,
                "start_date": since,
                "period": period_secs
            }]
        });
        if !hostids.is_empty() {
            params["hosts"] = json!(id_objects("hostid", hostids));
        }
        if !groupids.is_empty() {
            params["groups"] = json!(id_objects("groupid", groupids));
        }
        if let Some(text) = description {
            params["description"] = json!(text);
        }
        params
    }

    // ==================== Monitoring ====================

    pub fn host_items(hostid: &str) -> Value {
        json!({
            "output": ["itemid", "hostid", "name", "key_", "lastvalue", "units", "value_type"],
            "hostids": [hostid],
            "sortfield": "name"
        })
    }

    /// Items that have received at least one value.
    pub fn host_last_values(hostid: &str) -> Value {
        json!({
            "output": ["itemid", "hostid", "name", "key_", "lastvalue", "units", "value_type"],
            "hostids": [hostid],
            "filter": { "state": 0 },
            "sortfield": "name"
        })
    }

    pub fn host_triggers(hostid: &str) -> Value {
        json!({
            "output": ["triggerid", "description", "priority", "value", "status", "lastchange"],
            "hostids": [hostid],
            "expandDescription": true,
            "sortfield": "priority",
            "sortorder": "DESC"
        })
    }

    pub fn host_graphs(hostid: &str) -> Value {
        json!({
            "output": ["graphid", "name", "width", "height"],
            "hostids": [hostid],
            "sortfield": "name"
        })
    }

    // ==================== Misc objects ====================

    pub fn usermacro_list(hostids: Option<&[String]>) -> Value {
        match hostids {
            Some(ids) => json!({ "output": "extend", "hostids": ids }),
            None => json!({ "output": "extend", "globalmacro": true }),
        }
    }

    pub fn hostinterface_list(hostids: Option<&[String]>) -> Value {
        let mut params = json!({ "output": "extend" });
        if let Some(ids) = hostids {
            params["hostids"] = json!(ids);
        }
        params
    }

    pub fn mediatype_list() -> Value {
        json!({ "output": ["mediatypeid", "name", "type", "status"] })
    }

    pub fn action_list() -> Value {
        json!({ "output": ["actionid", "name", "eventsource", "status"] })
    }

    pub fn script_list() -> Value {
        json!({ "output": ["scriptid", "name", "command"] })
    }

    pub fn script_execute(scriptid: &str, hostid: &str) -> Value {
        json!({ "scriptid": scriptid, "hostid": hostid })
    }

    // ==================== Configuration export ====================

    /// configuration.export for one object kind, e.g. `hosts` or `templates`.
    pub fn export(kind: &str, ids: &[String]) -> Value {
        json!({
            "format": "json",
            "options": { kind: ids }
        })
    }

    /// configuration.export covering everything a backup needs.
    pub fn export_all(
        host_groups: &[String],
        hosts: &[String],
        template_groups: &[String],
        templates: &[String],
        media_types: &[String],
    ) -> Value {
        json!({
            "format": "json",
            "options": {
                "host_groups": host_groups,
                "hosts": hosts,
                "template_groups": template_groups,
                "templates": templates,
                "mediaTypes": media_types
            }
        })
    }

    /// Object ids only, used to build the export option lists.
    pub fn ids_only(id_field: &str) -> Value {
        json!({ "output": [id_field] })
    }

    pub fn extend() -> Value {
        json!({ "output": "extend" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::records::{GroupRef, HostInterface, TemplateRef};

    #[test]
    fn test_exporter_queries_are_bounded() {
        let items = Params::exporter_items();
        assert_eq!(items["limit"], 100);
        assert_eq!(items["filter"]["value_type"], json!(["0", "3"]));
        assert_eq!(items["monitored"], true);

        let problems = Params::exporter_problems();
        assert_eq!(problems["limit"], 50);
        assert_eq!(problems["sortorder"], "DESC");
        assert_eq!(problems["selectTags"], "extend");
    }

    #[test]
    fn test_host_create_without_interface() {
        let params = Params::host_create("web01", &["2".to_string()], None);
        assert_eq!(params["groups"], json!([{"groupid": "2"}]));
        assert!(params.get("interfaces").is_none());
    }

    #[test]
    fn test_host_create_with_interface() {
        let params = Params::host_create("web01", &["2".to_string()], Some("10.0.0.5"));
        assert_eq!(params["interfaces"][0]["ip"], "10.0.0.5");
        assert_eq!(params["interfaces"][0]["port"], DEFAULT_AGENT_PORT);
    }

    #[test]
    fn test_acknowledge_action_bits() {
        let ids = vec!["10".to_string()];
        assert_eq!(Params::acknowledge(&ids, "ok", false)["action"], 6);
        assert_eq!(Params::acknowledge(&ids, "ok", true)["action"], 7);
    }

    #[test]
    fn test_host_clone_strips_ids() {
        let source = Host {
            hostid: "10105".to_string(),
            host: "web01".to_string(),
            groups: vec![GroupRef {
                groupid: "2".to_string(),
                name: "Linux".to_string(),
            }],
            templates: vec![TemplateRef {
                templateid: "10001".to_string(),
                ..Default::default()
            }],
            interfaces: vec![HostInterface {
                interfaceid: "1".to_string(),
                hostid: "10105".to_string(),
                ip: "10.0.0.5".to_string(),
                port: "10050".to_string(),
                kind: "1".to_string(),
                main: "1".to_string(),
                useip: "1".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let params = Params::host_clone(&source, "web02");
        assert_eq!(params["host"], "web02");
        assert_eq!(params["templates"], json!([{"templateid": "10001"}]));
        assert!(params["interfaces"][0].get("interfaceid").is_none());
        assert!(params["interfaces"][0].get("hostid").is_none());
        assert_eq!(params["interfaces"][0]["type"], "1");
    }

    #[test]
    fn test_global_macros_when_no_host() {
        assert_eq!(Params::usermacro_list(None)["globalmacro"], true);
        let ids = vec!["1".to_string()];
        assert_eq!(Params::usermacro_list(Some(&ids))["hostids"], json!(["1"]));
    }
}
