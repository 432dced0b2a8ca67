//! HTTP client for the Zabbix JSON-RPC endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::protocol::jsonrpc::{requires_auth, JsonRpcRequest, JsonRpcResponse};
use crate::protocol::response::{as_string, decode_records};

/// Content type Zabbix expects on API requests.
pub const JSON_RPC_CONTENT_TYPE: &str = "application/json-rpc";

/// Transport options for [`ZabbixClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Overall per-request timeout; `None` disables it
    pub timeout: Option<Duration>,
    /// Reject invalid TLS certificates
    pub verify_ssl: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            verify_ssl: true,
        }
    }
}

#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

/// Zabbix API client holding a single session token.
///
/// The token is attached to every call except `user.login` and
/// `apiinfo.version`. Credentials given to [`ZabbixClient::login`] are kept so
/// an expired session can be renewed with [`ZabbixClient::relogin`].
pub struct ZabbixClient {
    url: String,
    http: Client,
    token: Option<String>,
    credentials: Option<Credentials>,
    next_id: AtomicU64,
}

impl ZabbixClient {
    pub fn new(url: &str, options: &ClientOptions) -> Result<Self, ApiError> {
        let mut builder = Client::builder().danger_accept_invalid_certs(!options.verify_ssl);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(|e| ApiError::Transport {
            url: url.to_string(),
            message: format!("HTTP client error: {}", e),
        })?;

        Ok(Self {
            url: url.to_string(),
            http,
            token: None,
            credentials: None,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Use an API token or a cached session instead of logging in.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Remember credentials without logging in yet.
    pub fn set_credentials(&mut self, username: &str, password: &str) {
        self.credentials = Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        });
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Log in with `user.login` and keep the returned session token.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String, ApiError> {
        let result = self
            .call(
                "user.login",
                json!({ "username": username, "password": password }),
            )
            .await?;

        let token = as_string(&result)?;
        self.set_credentials(username, password);
        self.token = Some(token.clone());
        debug!(user = username, "logged in to zabbix api");

        Ok(token)
    }

    /// Renew the session with the stored credentials.
    pub async fn relogin(&mut self) -> Result<String, ApiError> {
        let creds = self.credentials.clone().ok_or(ApiError::NotAuthenticated)?;
        self.token = None;
        self.login(&creds.username, &creds.password).await
    }

    /// Call `apiinfo.version`.
    pub async fn version(&self) -> Result<String, ApiError> {
        let result = self.call("apiinfo.version", json!({})).await?;
        as_string(&result)
    }

    /// Whether a cached session token is still accepted by the server.
    pub async fn session_valid(&self, token: &str) -> Result<bool, ApiError> {
        match self
            .call("user.checkAuthentication", json!({ "sessionid": token }))
            .await
        {
            Ok(_) => Ok(true),
            Err(ApiError::Rpc { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Issue one JSON-RPC call and return its `result`.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ApiError> {
        if requires_auth(method) && self.token.is_none() {
            return Err(ApiError::NotAuthenticated);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(method, params, self.token.as_deref(), id);
        let body = serde_json::to_vec(&request)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode request: {}", e)))?;

        debug!(method, id, "zabbix rpc call");

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, JSON_RPC_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| ApiError::Transport {
            url: self.url.clone(),
            message: e.to_string(),
        })?;

        match serde_json::from_slice::<JsonRpcResponse>(&bytes) {
            Ok(envelope) => envelope.into_result(),
            Err(_) if !status.is_success() => Err(ApiError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            }),
            Err(e) => Err(ApiError::InvalidResponse(format!(
                "Failed to parse JSON-RPC response: {}",
                e
            ))),
        }
    }

    /// Call a `*.get` method and decode the rows.
    pub async fn get<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<Vec<T>, ApiError> {
        let result = self.call(method, params).await?;
        decode_records(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::records::Host;
    use axum::{http::HeaderMap, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<Value>>>;

    /// Mock Zabbix endpoint answering every call through `reply`.
    async fn serve(reply: fn(&Value) -> Value) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let seen_handler = seen.clone();

        let app = Router::new().route(
            "/api_jsonrpc.php",
            post(move |headers: HeaderMap, body: axum::body::Bytes| {
                let seen = seen_handler.clone();
                async move {
                    let body: Value = serde_json::from_slice(&body).unwrap();
                    assert_eq!(
                        headers.get("content-type").unwrap(),
                        JSON_RPC_CONTENT_TYPE
                    );
                    seen.lock().unwrap().push(body.clone());
                    Json(reply(&body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/api_jsonrpc.php", addr), seen)
    }

    fn zabbix(body: &Value) -> Value {
        let id = body["id"].clone();
        match body["method"].as_str().unwrap_or("") {
            "apiinfo.version" => json!({"jsonrpc": "2.0", "result": "7.0.0", "id": id}),
            "user.login" => {
                if body["params"]["password"] == "zabbix" {
                    json!({"jsonrpc": "2.0", "result": "sess-token", "id": id})
                } else {
                    json!({"jsonrpc": "2.0", "error": {"code": -32500, "message": "Application error.", "data": "Incorrect user name or password or account is temporarily blocked."}, "id": id})
                }
            }
            "user.checkAuthentication" if body["params"]["sessionid"] == "sess-token" => {
                json!({"jsonrpc": "2.0", "result": {"userid": "1", "username": "Admin"}, "id": id})
            }
            "user.checkAuthentication" => {
                json!({"jsonrpc": "2.0", "error": {"code": -32602, "message": "Invalid params.", "data": "Session terminated, re-login, please."}, "id": id})
            }
            "host.get" => json!({"jsonrpc": "2.0", "result": [
                {"hostid": "10084", "host": "Zabbix server", "status": "0"},
                {"hostid": "10105", "host": "web01", "status": "1"}
            ], "id": id}),
            _ => json!({"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found.", "data": "Incorrect API \"nope\"."}, "id": id}),
        }
    }

    #[tokio::test]
    async fn test_version_is_unauthenticated() {
        let (url, seen) = serve(zabbix).await;
        let client = ZabbixClient::new(&url, &ClientOptions::default()).unwrap();

        assert_eq!(client.version().await.unwrap(), "7.0.0");
        let requests = seen.lock().unwrap();
        assert!(requests[0].get("auth").is_none());
    }

    #[tokio::test]
    async fn test_login_then_authenticated_get() {
        let (url, seen) = serve(zabbix).await;
        let mut client = ZabbixClient::new(&url, &ClientOptions::default()).unwrap();

        let token = client.login("Admin", "zabbix").await.unwrap();
        assert_eq!(token, "sess-token");
        assert!(client.has_credentials());

        let hosts: Vec<Host> = client.get("host.get", json!({})).await.unwrap();
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[1].host, "web01");

        let requests = seen.lock().unwrap();
        assert!(requests[0].get("auth").is_none());
        assert_eq!(requests[0]["params"]["username"], "Admin");
        assert_eq!(requests[1]["auth"], "sess-token");
        assert_ne!(requests[0]["id"], requests[1]["id"]);
    }

    #[tokio::test]
    async fn test_rpc_error_is_surfaced() {
        let (url, _) = serve(zabbix).await;
        let mut client = ZabbixClient::new(&url, &ClientOptions::default()).unwrap();

        let err = client.login("Admin", "wrong").await.unwrap_err();
        match err {
            ApiError::Rpc { code, ref data, .. } => {
                assert_eq!(code, -32500);
                assert!(data.contains("Incorrect user name"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn test_call_without_token_fails_locally() {
        let (url, seen) = serve(zabbix).await;
        let client = ZabbixClient::new(&url, &ClientOptions::default()).unwrap();

        let err = client.call("host.get", json!({})).await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_check() {
        let (url, seen) = serve(zabbix).await;
        let client = ZabbixClient::new(&url, &ClientOptions::default()).unwrap();

        assert!(client.session_valid("sess-token").await.unwrap());
        assert!(!client.session_valid("expired").await.unwrap());
        assert!(seen.lock().unwrap()[0].get("auth").is_none());
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client =
            ZabbixClient::new("http://127.0.0.1:1/api_jsonrpc.php", &ClientOptions::default())
                .unwrap();
        let err = client.version().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_relogin_without_credentials() {
        let mut client =
            ZabbixClient::new("http://127.0.0.1:1/api_jsonrpc.php", &ClientOptions::default())
                .unwrap();
        client.set_token("static-token");
        assert!(matches!(
            client.relogin().await,
            Err(ApiError::NotAuthenticated)
        ));
    }
}
