use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;

use crate::errors::WatchError;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Case-insensitive header lookup on an API Gateway `headers` object.
pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Returns the raw request body bytes, decoding API Gateway's base64 wrapping
/// when `isBase64Encoded` is set.
///
/// # Errors
///
/// Returns `BadRequest` if the body is missing, not a string, or not valid base64.
pub fn extract_body(payload: &Value) -> Result<Vec<u8>, WatchError> {
    let Some(body) = payload.get("body") else {
        return Err(WatchError::BadRequest("Missing body".to_string()));
    };

    let Some(body_str) = body.as_str() else {
        return Err(WatchError::BadRequest("Invalid body format".to_string()));
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if is_base64 {
        STANDARD
            .decode(body_str)
            .map_err(|e| WatchError::BadRequest(format!("Invalid base64 body: {e}")))
    } else {
        Ok(body_str.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_lookup_ignores_case() {
        let headers = json!({"X-Line-Signature": "abc", "content-type": "application/json"});
        assert_eq!(get_header_value(&headers, SIGNATURE_HEADER), Some("abc"));
        assert_eq!(get_header_value(&headers, "Content-Type"), Some("application/json"));
        assert_eq!(get_header_value(&headers, "x-missing"), None);
    }

    #[test]
    fn test_extract_body_plain_and_base64() {
        let plain = json!({"body": "{\"events\":[]}"});
        assert_eq!(extract_body(&plain).unwrap(), b"{\"events\":[]}");

        let encoded = json!({"body": STANDARD.encode("{\"events\":[]}"), "isBase64Encoded": true});
        assert_eq!(extract_body(&encoded).unwrap(), b"{\"events\":[]}");
    }

    #[test]
    fn test_extract_body_errors() {
        assert!(matches!(
            extract_body(&json!({})),
            Err(WatchError::BadRequest(ref m)) if m == "Missing body"
        ));
        assert!(matches!(
            extract_body(&json!({"body": 5})),
            Err(WatchError::BadRequest(_))
        ));
        assert!(matches!(
            extract_body(&json!({"body": "%%%", "isBase64Encoded": true})),
            Err(WatchError::BadRequest(_))
        ));
    }
}
