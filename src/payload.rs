use log::debug;
use serde_json::Value;

use crate::utils::{self, Integer};
use crate::InputError;

/// Key holding the integer inside the workflow payload
pub const DEFAULT_PAYLOAD_KEY: &str = "n";

/// Reads `n` from a JSON object such as `{"n": 4}`, the payload a workflow
/// hands to the step as its first argument.
///
/// A missing key and an explicit `null` both count as no input.
pub fn read_n(raw: Option<&str>, key: &str) -> Result<Integer, InputError> {
    let Some(raw) = raw else {
        return Err(InputError::Missing("payload argument".to_string()));
    };

    let event: Value =
        serde_json::from_str(raw).map_err(|e| InputError::MalformedPayload(e.to_string()))?;
    let Value::Object(fields) = event else {
        return Err(InputError::PayloadNotObject(event.to_string()));
    };

    match fields.get(key) {
        None | Some(Value::Null) => Err(InputError::Missing(format!("payload key '{}'", key))),
        Some(value) => {
            debug!("payload key '{}' holds {}", key, value);
            utils::int_from_json(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn reads_integer_from_object() {
        assert_eq!(read_n(Some(r#"{"n": 4}"#), DEFAULT_PAYLOAD_KEY), Ok(Integer::from(4)));
        assert_eq!(
            read_n(Some(r#"{"n": -7, "other": "x"}"#), DEFAULT_PAYLOAD_KEY),
            Ok(Integer::from(-7))
        );
        assert_eq!(read_n(Some(r#"{"count": 3}"#), "count"), Ok(Integer::from(3)));
    }

    #[test]
    fn integers_wider_than_64_bits() {
        let n = read_n(Some(r#"{"n": 100000000000000000000}"#), DEFAULT_PAYLOAD_KEY).unwrap();
        assert_eq!(n.as_str(), "100000000000000000000");
        assert!(n.is_even());

        let n = read_n(Some(r#"{"n": 100000000000000000001}"#), DEFAULT_PAYLOAD_KEY).unwrap();
        assert!(!n.is_even());
    }

    #[test]
    fn absent_payload_or_key_is_missing() {
        assert_matches!(read_n(None, DEFAULT_PAYLOAD_KEY), Err(InputError::Missing(_)));
        assert_matches!(read_n(Some("{}"), DEFAULT_PAYLOAD_KEY), Err(InputError::Missing(_)));
        assert_matches!(
            read_n(Some(r#"{"n": null}"#), DEFAULT_PAYLOAD_KEY),
            Err(InputError::Missing(_))
        );
        assert_matches!(read_n(Some(r#"{"n": 4}"#), "m"), Err(InputError::Missing(_)));
    }

    #[test]
    fn bad_payloads() {
        assert_matches!(
            read_n(Some("{n: 4}"), DEFAULT_PAYLOAD_KEY),
            Err(InputError::MalformedPayload(_))
        );
        assert_matches!(read_n(Some(""), DEFAULT_PAYLOAD_KEY), Err(InputError::MalformedPayload(_)));
        assert_matches!(read_n(Some("4"), DEFAULT_PAYLOAD_KEY), Err(InputError::PayloadNotObject(_)));
        assert_matches!(
            read_n(Some(r#"[{"n": 4}]"#), DEFAULT_PAYLOAD_KEY),
            Err(InputError::PayloadNotObject(_))
        );
    }

    #[test]
    fn numeric_looking_values_are_not_integers() {
        for raw in [r#"{"n": "4"}"#, r#"{"n": 4.5}"#, r#"{"n": 4.0}"#, r#"{"n": true}"#] {
            assert_matches!(
                read_n(Some(raw), DEFAULT_PAYLOAD_KEY),
                Err(InputError::PayloadNotInteger(_))
            );
        }
    }
}
