use crate::error::{Result, RuobrError};
use serde_json::Value;

/// Interpret a raw response body.
///
/// Parses the body as JSON (a non-JSON body becomes a `Protocol` error
/// carrying the raw text and HTTP status) and applies the service envelope
/// rules: a JSON object with `success: false` is always an error, never a
/// silent empty result. Anything else is returned unchanged, object or array.
pub fn interpret(status: u16, body: &[u8]) -> Result<Value> {
    let value: Value = serde_json::from_slice(body).map_err(|_| RuobrError::Protocol {
        status,
        body: String::from_utf8_lossy(body).into_owned(),
    })?;
    check_envelope(value)
}

/// Apply the ad-hoc success/error envelope the service uses.
///
/// On failure the service reports either `error` (human-readable message) or
/// `error_type` (machine code, `"auth"` reserved for credential failures).
pub fn check_envelope(value: Value) -> Result<Value> {
    match value {
        Value::Object(map) if map.get("success") == Some(&Value::Bool(false)) => {
            if let Some(message) = map.get("error").and_then(Value::as_str) {
                return Err(RuobrError::remote(message));
            }
            let error_type = map
                .get("error_type")
                .and_then(Value::as_str)
                .map(str::to_owned);
            match error_type.as_deref() {
                Some("auth") => Err(RuobrError::Authentication),
                Some(code) => Err(RuobrError::remote(code)),
                None => Err(RuobrError::remote_payload(Value::Object(map))),
            }
        }
        other => Ok(other),
    }
}

/// Strict typed mapping: convert an envelope-checked JSON value into a
/// record type, failing loudly with `Schema` on any shape mismatch
pub fn convert<T>(value: Value) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(RuobrError::Schema)
}

/// Pull a wrapper key out of an object response (`messages`, `lessons`,
/// `subjects`, ...), failing with `Schema` when the key is absent
pub fn extract(value: Value, key: &str) -> Result<Value> {
    match value {
        Value::Object(mut map) => map.remove(key).ok_or_else(|| {
            RuobrError::Schema(serde::de::Error::custom(format!(
                "missing `{}` in response",
                key
            )))
        }),
        other => Err(RuobrError::Schema(serde::de::Error::custom(format!(
            "expected an object with `{}`, got {}",
            key, other
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_json_body_is_protocol_error() {
        let err = interpret(502, b"<html>Bad Gateway</html>").unwrap_err();
        match err {
            RuobrError::Protocol { status, body } => {
                assert_eq!(status, 502);
                assert!(body.contains("Bad Gateway"));
            }
            other => panic!("expected Protocol, got {:?}", other),
        }
    }

    #[test]
    fn test_auth_error_type() {
        let err = check_envelope(json!({"success": false, "error_type": "auth"})).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_error_message_wins_over_error_type() {
        let err = check_envelope(
            json!({"success": false, "error": "X", "error_type": "something"}),
        )
        .unwrap_err();
        match err {
            RuobrError::Remote { message, .. } => assert_eq!(message, "X"),
            other => panic!("expected Remote, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_failure_keeps_envelope() {
        let err = check_envelope(json!({"success": false, "detail": 42})).unwrap_err();
        match err {
            RuobrError::Remote { payload, .. } => {
                assert_eq!(payload.unwrap()["detail"], 42);
            }
            other => panic!("expected Remote, got {:?}", other),
        }
    }

    #[test]
    fn test_success_true_passes_through() {
        let value = check_envelope(json!({"success": true, "id": 1})).unwrap();
        assert_eq!(value["id"], 1);
    }

    #[test]
    fn test_array_passes_through() {
        let value = check_envelope(json!([1, 2, 3])).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_extract_wrapper_key() {
        let value = extract(json!({"messages": [1, 2]}), "messages").unwrap();
        assert_eq!(value, json!([1, 2]));

        assert!(matches!(
            extract(json!({"other": []}), "messages"),
            Err(RuobrError::Schema(_))
        ));
        assert!(matches!(
            extract(json!([1, 2]), "messages"),
            Err(RuobrError::Schema(_))
        ));
    }

    #[test]
    fn test_convert_reports_schema_error() {
        #[derive(serde::Deserialize)]
        struct Probe {
            #[allow(dead_code)]
            id: i64,
        }

        assert!(matches!(
            convert::<Probe>(json!({"id": "not a number"})),
            Err(RuobrError::Schema(_))
        ));
    }
}
