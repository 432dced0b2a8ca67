//! Error types for zabbix-dna core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Salt error: {0}")]
    Salt(#[from] SaltError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

fn data_suffix(data: &str) -> String {
    if data.trim().is_empty() {
        String::new()
    } else {
        format!(" ({})", data)
    }
}

/// Zabbix JSON-RPC errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error object returned by the server.
    #[error("zabbix error {code}: {message}{}", data_suffix(.data))]
    Rpc {
        code: i64,
        message: String,
        data: String,
    },

    #[error("HTTP request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("no authentication provided (token or user/password)")]
    NotAuthenticated,

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
}

impl ApiError {
    /// Whether the server rejected the session token.
    pub fn is_auth_error(&self) -> bool {
        match self {
            ApiError::Rpc { message, data, .. } => {
                let text = format!("{} {}", message, data).to_lowercase();
                text.contains("session terminated")
                    || text.contains("re-login")
                    || text.contains("not authorised")
                    || text.contains("not authorized")
                    || text.contains("invalid session")
            }
            ApiError::HttpStatus { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access storage directory: {0}")]
    DirectoryAccess(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// SaltStack (salt-api) errors
#[derive(Debug, Error)]
pub enum SaltError {
    #[error("salt-api request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("salt-api login rejected (HTTP {0})")]
    LoginRejected(u16),

    #[error("salt-api returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Invalid salt-api response: {0}")]
    InvalidResponse(String),

    #[error("Invalid salt command: {0}")]
    InvalidCommand(String),

    #[error("Not logged in to salt-api")]
    NotLoggedIn,
}

/// OpenTelemetry pipeline errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to build {signal} exporter: {message}")]
    Exporter {
        signal: &'static str,
        message: String,
    },

    #[error("Invalid interval '{0}': {1}")]
    InvalidInterval(String, String),

    #[error("No OTLP endpoint configured")]
    MissingEndpoint,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_display() {
        let err = ApiError::Rpc {
            code: -32602,
            message: "Invalid params.".to_string(),
            data: "No permissions to referred object.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "zabbix error -32602: Invalid params. (No permissions to referred object.)"
        );
    }

    #[test]
    fn test_rpc_error_without_data() {
        let err = ApiError::Rpc {
            code: -32600,
            message: "Invalid request.".to_string(),
            data: String::new(),
        };
        assert_eq!(err.to_string(), "zabbix error -32600: Invalid request.");
    }

    #[test]
    fn test_auth_error_detection() {
        let expired = ApiError::Rpc {
            code: -32602,
            message: "Invalid params.".to_string(),
            data: "Session terminated, re-login, please.".to_string(),
        };
        assert!(expired.is_auth_error());

        let other = ApiError::Rpc {
            code: -32500,
            message: "Application error.".to_string(),
            data: "Host with the same name already exists.".to_string(),
        };
        assert!(!other.is_auth_error());

        assert!(ApiError::HttpStatus {
            url: "http://zbx".to_string(),
            status: 401
        }
        .is_auth_error());
    }

    #[test]
    fn test_core_error_from_api_error() {
        let err = CoreError::from(ApiError::NotFound {
            kind: "host",
            name: "web01".to_string(),
        });
        assert!(format!("{}", err).contains("host not found: web01"));
    }
}
