//! JSON-RPC 2.0 envelope used by the Zabbix API.
//!
//! - Request: `{"jsonrpc": "2.0", "method": "...", "params": ..., "auth": "...", "id": 1}`
//! - Response: `{"jsonrpc": "2.0", "result": ..., "error": ..., "id": 1}`
//! - Error: `{"code": -32602, "message": "Invalid params.", "data": "..."}`
//!
//! `auth` is left out entirely for unauthenticated methods.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Methods that must be called without a session token.
pub const UNAUTHENTICATED_METHODS: &[&str] = &["user.login", "user.checkAuthentication", "apiinfo.version"];

/// Whether `method` takes the `auth` field.
pub fn requires_auth(method: &str) -> bool {
    !UNAUTHENTICATED_METHODS.contains(&method)
}

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always "2.0"
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    /// Session token, omitted for login and version calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: &str, params: Value, auth: Option<&str>, id: u64) -> Self {
        let auth = if requires_auth(method) {
            auth.map(str::to_string)
        } else {
            None
        };

        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            auth,
            id,
        }
    }
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: Value,
}

impl JsonRpcResponse {
    /// Split the envelope into its result or the server-side error.
    pub fn into_result(self) -> Result<Value, ApiError> {
        if let Some(error) = self.error {
            return Err(error.into());
        }

        self.result
            .ok_or_else(|| ApiError::InvalidResponse("response has neither result nor error".to_string()))
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    /// Zabbix puts the detailed reason here, usually a string
    #[serde(default)]
    pub data: Option<Value>,
}

impl From<JsonRpcError> for ApiError {
    fn from(e: JsonRpcError) -> Self {
        let data = match e.data {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        ApiError::Rpc {
            code: e.code,
            message: e.message,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_has_no_auth() {
        let req = JsonRpcRequest::new("user.login", json!({}), Some("token"), 1);
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("auth").is_none());
        assert_eq!(value["jsonrpc"], "2.0");
    }

    #[test]
    fn test_authenticated_request_carries_token() {
        let req = JsonRpcRequest::new("host.get", json!({"output": "extend"}), Some("abc"), 7);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["auth"], "abc");
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn test_error_response_into_result() {
        let resp: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "error": {"code": -32500, "message": "Application error.", "data": "No permissions."},
            "id": 1
        }))
        .unwrap();

        let err = resp.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "zabbix error -32500: Application error. (No permissions.)"
        );
    }

    #[test]
    fn test_empty_response_is_invalid() {
        let resp: JsonRpcResponse = serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1})).unwrap();
        assert!(matches!(resp.into_result(), Err(ApiError::InvalidResponse(_))));
    }
}
