//! Decoding helpers for JSON-RPC results.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Decode a `*.get` result into typed records.
pub fn decode_records<T: DeserializeOwned>(result: Value) -> Result<Vec<T>, ApiError> {
    serde_json::from_value(result)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to decode records: {}", e)))
}

/// Decode a single-object result (e.g. `script.execute`).
pub fn decode_object<T: DeserializeOwned>(result: Value) -> Result<T, ApiError> {
    serde_json::from_value(result)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to decode object: {}", e)))
}

/// Ids returned by a create/update/delete call, e.g. `{"hostids": ["10105"]}`.
pub fn returned_ids(result: &Value, key: &str) -> Vec<String> {
    result
        .get(key)
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .map(|id| match id {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// First id of a create call, or an error when the server returned none.
pub fn first_id(result: &Value, key: &str) -> Result<String, ApiError> {
    returned_ids(result, key)
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::InvalidResponse(format!("Missing '{}' in result", key)))
}

/// Plain string result such as `apiinfo.version` or `user.login`.
pub fn as_string(result: &Value) -> Result<String, ApiError> {
    result
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ApiError::InvalidResponse(format!("Expected a string, got {}", result)))
}

/// Count of rows in a list result without decoding them.
pub fn row_count(result: &Value) -> usize {
    result.as_array().map(Vec::len).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::records::Host;
    use serde_json::json;

    #[test]
    fn test_decode_records_keeps_order() {
        let hosts: Vec<Host> = decode_records(json!([
            {"hostid": "3", "host": "c"},
            {"hostid": "1", "host": "a"},
            {"hostid": "2", "host": "b"}
        ]))
        .unwrap();

        let ids: Vec<&str> = hosts.iter().map(|h| h.hostid.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_decode_records_rejects_object() {
        let result: Result<Vec<Host>, _> = decode_records(json!({"hostid": "1"}));
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_returned_ids() {
        let result = json!({"hostids": ["10105", 10106]});
        assert_eq!(returned_ids(&result, "hostids"), vec!["10105", "10106"]);
        assert_eq!(first_id(&result, "hostids").unwrap(), "10105");
        assert!(first_id(&result, "groupids").is_err());
    }

    #[test]
    fn test_as_string() {
        assert_eq!(as_string(&json!("7.0.0")).unwrap(), "7.0.0");
        assert!(as_string(&json!(7)).is_err());
    }
}
