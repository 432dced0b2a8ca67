//! Name to id resolution for Zabbix objects.

use serde_json::Value;
use tracing::warn;

use super::ZabbixClient;
use crate::error::ApiError;
use crate::protocol::Params;

/// Objects that can be looked up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Host,
    HostGroup,
    Template,
    TemplateGroup,
    User,
    UserGroup,
    Maintenance,
}

impl Lookup {
    fn method(self) -> &'static str {
        match self {
            Lookup::Host => "host.get",
            Lookup::HostGroup => "hostgroup.get",
            Lookup::Template => "template.get",
            Lookup::TemplateGroup => "templategroup.get",
            Lookup::User => "user.get",
            Lookup::UserGroup => "usergroup.get",
            Lookup::Maintenance => "maintenance.get",
        }
    }

    fn id_field(self) -> &'static str {
        match self {
            Lookup::Host => "hostid",
            Lookup::HostGroup | Lookup::TemplateGroup => "groupid",
            Lookup::Template => "templateid",
            Lookup::User => "userid",
            Lookup::UserGroup => "usrgrpid",
            Lookup::Maintenance => "maintenanceid",
        }
    }

    fn name_field(self) -> &'static str {
        match self {
            Lookup::Host | Lookup::Template => "host",
            Lookup::User => "username",
            _ => "name",
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            Lookup::Host => "host",
            Lookup::HostGroup => "host group",
            Lookup::Template => "template",
            Lookup::TemplateGroup => "template group",
            Lookup::User => "user",
            Lookup::UserGroup => "user group",
            Lookup::Maintenance => "maintenance",
        }
    }
}

fn field_str<'a>(row: &'a Value, field: &str) -> &'a str {
    row.get(field).and_then(Value::as_str).unwrap_or("")
}

/// Resolve names to ids in input order, skipping unknown names.
pub async fn resolve_ids(
    client: &ZabbixClient,
    lookup: Lookup,
    names: &[String],
) -> Result<Vec<String>, ApiError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<Value> = client
        .get(
            lookup.method(),
            Params::lookup(lookup.id_field(), lookup.name_field(), names),
        )
        .await?;

    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        match rows
            .iter()
            .find(|row| field_str(row, lookup.name_field()) == name)
        {
            Some(row) => ids.push(field_str(row, lookup.id_field()).to_string()),
            None => warn!(name = %name, "{} not found, skipping", lookup.kind()),
        }
    }

    Ok(ids)
}

/// Resolve one name, failing with `NotFound` when it does not exist.
pub async fn resolve_id(client: &ZabbixClient, lookup: Lookup, name: &str) -> Result<String, ApiError> {
    resolve_ids(client, lookup, &[name.to_string()])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound {
            kind: lookup.kind(),
            name: name.to_string(),
        })
}

/// Resolve names, failing when none of them exist.
pub async fn resolve_some(
    client: &ZabbixClient,
    lookup: Lookup,
    names: &[String],
) -> Result<Vec<String>, ApiError> {
    let ids = resolve_ids(client, lookup, names).await?;
    if ids.is_empty() {
        return Err(ApiError::NotFound {
            kind: lookup.kind(),
            name: names.join(","),
        });
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientOptions;
    use axum::{routing::post, Json, Router};
    use serde_json::json;

    async fn serve() -> String {
        let app = Router::new().route(
            "/",
            post(|body: axum::body::Bytes| async move {
                let body: Value = serde_json::from_slice(&body).unwrap();
                let id = body["id"].clone();
                let result = match body["method"].as_str().unwrap_or("") {
                    "host.get" => json!([
                        {"hostid": "2", "host": "db01"},
                        {"hostid": "1", "host": "web01"}
                    ]),
                    _ => json!([]),
                };
                Json(json!({"jsonrpc": "2.0", "result": result, "id": id}))
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    async fn client() -> ZabbixClient {
        let mut client = ZabbixClient::new(&serve().await, &ClientOptions::default()).unwrap();
        client.set_token("t");
        client
    }

    #[tokio::test]
    async fn test_resolve_ids_in_input_order() {
        let client = client().await;
        let names = vec!["web01".to_string(), "missing".to_string(), "db01".to_string()];
        let ids = resolve_ids(&client, Lookup::Host, &names).await.unwrap();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_resolve_id_not_found() {
        let client = client().await;
        let err = resolve_id(&client, Lookup::HostGroup, "Linux servers")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "host group not found: Linux servers");
    }

    #[tokio::test]
    async fn test_resolve_some_requires_a_match() {
        let client = client().await;
        assert!(resolve_some(&client, Lookup::Host, &["nope".to_string()])
            .await
            .is_err());
    }
}
