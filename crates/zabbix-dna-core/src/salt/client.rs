//! salt-api (rest_cherrypy) client.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::SaltError;

/// Minion targeting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Glob,
    List,
    Pcre,
    Grain,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Glob => "glob",
            TargetType::List => "list",
            TargetType::Pcre => "pcre",
            TargetType::Grain => "grain",
        }
    }
}

/// A job published to the master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaltJob {
    pub jid: String,
    #[serde(default)]
    pub minions: Vec<String>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "return")]
    ret: Vec<Value>,
}

pub struct SaltClient {
    url: String,
    http: Client,
    token: Option<String>,
}

impl SaltClient {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, SaltError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| SaltError::Transport {
            url: url.to_string(),
            message: format!("HTTP client error: {}", e),
        })?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            http,
            token: None,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    async fn post(&self, path: &str, body: Value) -> Result<(u16, Envelope), SaltError> {
        let url = format!("{}{}", self.url, path);
        let body = serde_json::to_vec(&body).map_err(|e| SaltError::InvalidCommand(e.to_string()))?;
        let mut request = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(token) = &self.token {
            request = request.header("X-Auth-Token", token);
        }

        let response = request.send().await.map_err(|e| SaltError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| SaltError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        if !(200..300).contains(&status) {
            return Ok((status, Envelope { ret: Vec::new() }));
        }

        let envelope = serde_json::from_slice(&bytes)
            .map_err(|e| SaltError::InvalidResponse(e.to_string()))?;
        Ok((status, envelope))
    }

    /// Authenticate against `/login` and keep the token.
    pub async fn login(&mut self, username: &str, password: &str, eauth: &str) -> Result<(), SaltError> {
        let (status, envelope) = self
            .post(
                "/login",
                json!({ "username": username, "password": password, "eauth": eauth }),
            )
            .await?;

        if !(200..300).contains(&status) {
            return Err(SaltError::LoginRejected(status));
        }

        let token = envelope
            .ret
            .first()
            .and_then(|r| r.get("token"))
            .and_then(Value::as_str)
            .ok_or_else(|| SaltError::InvalidResponse("login response has no token".to_string()))?;

        self.token = Some(token.to_string());
        debug!(user = username, "logged in to salt-api");
        Ok(())
    }

    /// Publish `fun` asynchronously to the targeted minions.
    pub async fn publish(
        &self,
        target: &str,
        target_type: TargetType,
        fun: &str,
        args: &[String],
    ) -> Result<SaltJob, SaltError> {
        if self.token.is_none() {
            return Err(SaltError::NotLoggedIn);
        }

        let lowstate = json!([{
            "client": "local_async",
            "tgt": target,
            "tgt_type": target_type.as_str(),
            "fun": fun,
            "arg": args
        }]);

        let (status, envelope) = self.post("/", lowstate).await?;
        if !(200..300).contains(&status) {
            return Err(SaltError::HttpStatus(status));
        }

        let job = envelope
            .ret
            .into_iter()
            .next()
            .ok_or_else(|| SaltError::InvalidResponse("empty return".to_string()))?;

        serde_json::from_value(job).map_err(|e| {
            SaltError::InvalidResponse(format!("no job id in response (no minions matched?): {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};

    async fn serve() -> String {
        let app = Router::new()
            .route(
                "/login",
                post(|Json(body): Json<Value>| async move {
                    if body["password"] == "salt" && body["eauth"] == "pam" {
                        (StatusCode::OK, Json(json!({"return": [{"token": "salt-tok", "expire": 0}]})))
                    } else {
                        (StatusCode::UNAUTHORIZED, Json(json!({"return": []})))
                    }
                }),
            )
            .route(
                "/",
                post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                    if headers.get("x-auth-token").map(|v| v == "salt-tok") != Some(true) {
                        return (StatusCode::UNAUTHORIZED, Json(json!({})));
                    }
                    let low = &body[0];
                    assert_eq!(low["client"], "local_async");
                    (
                        StatusCode::OK,
                        Json(json!({"return": [{"jid": "20241016120000", "minions": [low["tgt"]]}]})),
                    )
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_login_and_publish() {
        let url = serve().await;
        let mut client = SaltClient::new(&url, None).unwrap();
        assert!(matches!(
            client.publish("*", TargetType::Glob, "test.ping", &[]).await,
            Err(SaltError::NotLoggedIn)
        ));

        client.login("salt", "salt", "pam").await.unwrap();
        assert!(client.is_logged_in());

        let job = client
            .publish("proxy-01", TargetType::List, "test.ping", &[])
            .await
            .unwrap();
        assert_eq!(job.jid, "20241016120000");
        assert_eq!(job.minions, vec!["proxy-01"]);
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let url = serve().await;
        let mut client = SaltClient::new(&url, None).unwrap();
        assert!(matches!(
            client.login("salt", "wrong", "pam").await,
            Err(SaltError::LoginRejected(401))
        ));
    }
}
