//! # Validation Module
//!
//! Input validation and UI-boundary payload decoding.
//!
//! ## Where Payloads Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Add-to-cart Trigger                                │
//! │                                                                         │
//! │  Button data attribute (URL-encoded JSON)                              │
//! │  "%7B%22isbn%22%3A%22c8fa...%22%2C%22price%22%3A35%7D"                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  decode_trigger_payload()  ── THIS MODULE                              │
//! │  ├── percent-decode                                                    │
//! │  └── parse as JSON object                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  LineItem::from_payload()  ── isbn required, keyid assigned            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  cart::add_to_cart()       ── Err at any step = silent no-op           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::ItemPayload;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - Must not contain `,` or `/` (it is spliced into the offers URL path)
///
/// ## Example
/// ```rust
/// use bookcart_core::validation::validate_isbn;
///
/// assert!(validate_isbn("c8fabf68-8374-48fe-a7ea-a00ccd07afff").is_ok());
/// assert!(validate_isbn("  ").is_err());
/// assert!(validate_isbn("a,b").is_err());
/// ```
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    if isbn.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "isbn".to_string(),
        });
    }

    if isbn.contains([',', '/']) {
        return Err(ValidationError::InvalidFormat {
            field: "isbn".to_string(),
            reason: "must not contain ',' or '/'".to_string(),
        });
    }

    Ok(())
}

/// Decodes the URL-encoded JSON carried by an add-to-cart trigger.
///
/// Decoding follows `decodeURIComponent`: `%XX` escapes are decoded, `+`
/// is left alone, and a `%` not followed by two hex digits is an error.
///
/// ## Example
/// ```rust
/// use bookcart_core::validation::decode_trigger_payload;
///
/// let payload = decode_trigger_payload("%7B%22isbn%22%3A%22abc%22%7D").unwrap();
/// assert_eq!(payload["isbn"], "abc");
///
/// assert!(decode_trigger_payload("%5B1%2C2%5D").is_err()); // an array
/// ```
pub fn decode_trigger_payload(raw: &str) -> CoreResult<ItemPayload> {
    check_escapes(raw)?;
    let decoded =
        urlencoding::decode(raw).map_err(|e| CoreError::InvalidEncoding(e.to_string()))?;

    let value: Value =
        serde_json::from_str(&decoded).map_err(|e| CoreError::MalformedPayload {
            reason: e.to_string(),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::MalformedPayload {
            reason: format!("expected a JSON object, got {}", json_type_name(&other)),
        }),
    }
}

/// `urlencoding` passes malformed escapes through verbatim, so reject them
/// up front.
fn check_escapes(raw: &str) -> CoreResult<()> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let well_formed = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(CoreError::InvalidEncoding(format!(
                "malformed escape at byte {i}"
            )));
        }
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_trigger_payload() {
        let raw = urlencoding::encode(r#"{"isbn":"c8fa","title":"Henri Potier","price":35}"#);
        let payload = decode_trigger_payload(&raw).unwrap();

        assert_eq!(payload["isbn"], "c8fa");
        assert_eq!(payload["title"], "Henri Potier");
        assert_eq!(payload["price"], 35);
    }

    #[test]
    fn test_decode_keeps_plus_sign() {
        let payload = decode_trigger_payload("%7B%22title%22%3A%22a+b%22%7D").unwrap();
        assert_eq!(payload["title"], "a+b");
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        assert!(matches!(
            decode_trigger_payload("not%20json"),
            Err(CoreError::MalformedPayload { .. })
        ));
        assert!(matches!(
            decode_trigger_payload("null"),
            Err(CoreError::MalformedPayload { .. })
        ));
        assert!(matches!(
            decode_trigger_payload(""),
            Err(CoreError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_bad_utf8() {
        assert!(matches!(
            decode_trigger_payload("%FF%FE"),
            Err(CoreError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_decode_rejects_malformed_escapes() {
        for raw in ["%7B%22isbn%22%3A%22%ZZ%22%7D", "%7B%7D%", "%7B%7D%4"] {
            assert!(
                matches!(decode_trigger_payload(raw), Err(CoreError::InvalidEncoding(_))),
                "{raw} should be rejected"
            );
        }
        // A literal percent sign must itself be escaped
        let payload = decode_trigger_payload("%7B%22isbn%22%3A%22a%25b%22%7D").unwrap();
        assert_eq!(payload["isbn"], "a%b");
    }

    #[test]
    fn test_validate_isbn() {
        assert!(validate_isbn("a460afed-e5e7-4e39-a39d-c885c05db861").is_ok());
        assert_eq!(
            validate_isbn(""),
            Err(ValidationError::Required {
                field: "isbn".to_string()
            })
        );
        assert!(validate_isbn("a/b").is_err());
    }
}
