//! Typed records decoded from Zabbix API results.
//!
//! Zabbix encodes ids, flags and numbers as strings, and every field may be
//! missing depending on the `output` requested, so all fields default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRef {
    pub hostid: String,
    pub host: String,
    pub name: String,
}

impl HostRef {
    /// Visible name, falling back to the technical name.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.host
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupRef {
    pub groupid: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateRef {
    pub templateid: String,
    pub host: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostInterface {
    pub interfaceid: String,
    pub hostid: String,
    pub ip: String,
    pub dns: String,
    pub port: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub main: String,
    pub useip: String,
    pub available: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Host {
    pub hostid: String,
    pub host: String,
    pub name: String,
    pub status: String,
    pub maintenance_status: String,
    #[serde(alias = "proxyid")]
    pub proxy_hostid: String,
    #[serde(alias = "hostgroups")]
    pub groups: Vec<GroupRef>,
    #[serde(alias = "parentTemplates")]
    pub templates: Vec<TemplateRef>,
    pub interfaces: Vec<HostInterface>,
}

impl Host {
    /// Availability of the first interface that reports one.
    pub fn availability(&self) -> &str {
        self.interfaces
            .iter()
            .map(|i| i.available.as_str())
            .find(|a| !a.is_empty())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostGroup {
    pub groupid: String,
    pub name: String,
    pub hosts: Vec<HostRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    pub templateid: String,
    pub host: String,
    pub name: String,
    #[serde(alias = "templategroups")]
    pub groups: Vec<GroupRef>,
    /// A count string with `selectItems: "count"`, a list otherwise
    pub items: Value,
}

impl Template {
    pub fn item_count(&self) -> String {
        match &self.items {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Array(a) => a.len().to_string(),
            _ => "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateGroup {
    pub groupid: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserGroupRef {
    pub usrgrpid: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub mediatypeid: String,
    /// A string for most media types, a list for email
    pub sendto: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub userid: String,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub roleid: String,
    pub usrgrps: Vec<UserGroupRef>,
    pub medias: Vec<Media>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Right {
    pub id: String,
    pub permission: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserGroup {
    pub usrgrpid: String,
    pub name: String,
    #[serde(alias = "hostgroup_rights")]
    pub rights: Vec<Right>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proxy {
    pub proxyid: String,
    #[serde(alias = "host")]
    pub name: String,
    pub operating_mode: String,
    pub address: String,
    pub version: String,
    pub compatibility: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub itemid: String,
    pub hostid: String,
    pub name: String,
    pub key_: String,
    pub lastvalue: String,
    pub value_type: String,
    pub units: String,
    pub hosts: Vec<HostRef>,
}

impl Item {
    /// Name of the owning host, falling back to its id.
    pub fn host_label(&self) -> &str {
        self.hosts
            .first()
            .map(HostRef::display_name)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.hostid)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trigger {
    pub triggerid: String,
    pub description: String,
    pub expression: String,
    pub priority: String,
    pub value: String,
    pub status: String,
    pub lastchange: String,
    pub hosts: Vec<HostRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub tag: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Problem {
    pub eventid: String,
    pub objectid: String,
    pub name: String,
    pub severity: String,
    pub clock: String,
    pub r_eventid: String,
    pub acknowledged: String,
    pub tags: Vec<Tag>,
}

impl Problem {
    /// A recovery event id other than "0" marks the problem resolved.
    pub fn is_resolved(&self) -> bool {
        !self.r_eventid.is_empty() && self.r_eventid != "0"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub eventid: String,
    pub objectid: String,
    pub name: String,
    pub severity: String,
    pub clock: String,
    pub acknowledged: String,
    pub hosts: Vec<HostRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Maintenance {
    pub maintenanceid: String,
    pub name: String,
    pub maintenance_type: String,
    pub active_since: String,
    pub active_till: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserMacro {
    pub hostmacroid: String,
    pub globalmacroid: String,
    pub hostid: String,
    #[serde(rename = "macro")]
    pub name: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Graph {
    pub graphid: String,
    pub name: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaType {
    pub mediatypeid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub actionid: String,
    pub name: String,
    pub eventsource: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub scriptid: String,
    pub name: String,
    pub command: String,
}

/// Result of `script.execute`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptResult {
    pub response: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_host_decodes_with_missing_fields() {
        let host: Host = serde_json::from_value(json!({
            "hostid": "10084",
            "host": "Zabbix server",
            "hostgroups": [{"groupid": "4", "name": "Zabbix servers"}]
        }))
        .unwrap();

        assert_eq!(host.hostid, "10084");
        assert_eq!(host.groups[0].name, "Zabbix servers");
        assert!(host.interfaces.is_empty());
        assert_eq!(host.availability(), "");
    }

    #[test]
    fn test_item_host_label_falls_back_to_hostid() {
        let item = Item {
            hostid: "10084".to_string(),
            ..Default::default()
        };
        assert_eq!(item.host_label(), "10084");

        let item = Item {
            hostid: "10084".to_string(),
            hosts: vec![HostRef {
                host: "srv".to_string(),
                name: "Server".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(item.host_label(), "Server");
    }

    #[test]
    fn test_problem_resolution() {
        let mut problem = Problem::default();
        assert!(!problem.is_resolved());

        problem.r_eventid = "0".to_string();
        assert!(!problem.is_resolved());

        problem.r_eventid = "4711".to_string();
        assert!(problem.is_resolved());
    }

    #[test]
    fn test_template_item_count() {
        let t: Template = serde_json::from_value(json!({"templateid": "1", "items": "12"})).unwrap();
        assert_eq!(t.item_count(), "12");

        let t: Template = serde_json::from_value(json!({"templateid": "1", "items": [{}, {}]})).unwrap();
        assert_eq!(t.item_count(), "2");
    }

    #[test]
    fn test_macro_field_rename() {
        let m: UserMacro =
            serde_json::from_value(json!({"macro": "{$SNMP_COMMUNITY}", "value": "public"})).unwrap();
        assert_eq!(m.name, "{$SNMP_COMMUNITY}");
    }
}
