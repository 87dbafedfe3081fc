//! # Domain Types
//!
//! Core domain types used throughout bookcart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────┐      │
//! │  │    LineItem     │   │     Offer       │   │ CommercialOffers │      │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────  │      │
//! │  │  isbn           │   │  kind (type)    │   │  offers: [Offer] │      │
//! │  │  keyid (UUID)   │   │  value          │   └──────────────────┘      │
//! │  │  ...opaque      │   │  slice_value?   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every line item has:
//! - `keyid`: UUID v4 generated on insertion, used for removal
//! - `isbn`: the product identifier, repeated if the same book is added twice

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validation::{validate_isbn, ValidationResult};

/// Raw item attributes as decoded from a UI trigger.
pub type ItemPayload = Map<String, Value>;

// =============================================================================
// Line Item
// =============================================================================

/// One article in the cart.
///
/// Product fields other than `isbn` (title, price, cover, ...) are carried
/// through opaquely in `fields` and round-trip unchanged through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, sent to the offers endpoint.
    pub isbn: String,

    /// Local unique key, generated when the item enters the cart.
    pub keyid: String,

    /// Every other product attribute, untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LineItem {
    /// Builds a line item from a decoded payload, assigning a fresh `keyid`.
    ///
    /// Any `keyid` already present in the payload is discarded.
    pub fn from_payload(mut payload: ItemPayload) -> ValidationResult<Self> {
        let isbn = match payload.remove("isbn") {
            Some(Value::String(isbn)) => isbn,
            Some(_) => {
                return Err(ValidationError::InvalidFormat {
                    field: "isbn".to_string(),
                    reason: "expected a string".to_string(),
                })
            }
            None => {
                return Err(ValidationError::Required {
                    field: "isbn".to_string(),
                })
            }
        };
        validate_isbn(&isbn)?;

        payload.remove("keyid");

        Ok(LineItem {
            isbn,
            keyid: new_keyid(),
            fields: payload,
        })
    }

    /// The item's unit price, when the payload carried a numeric `price`.
    pub fn price(&self) -> Option<f64> {
        self.fields.get("price").and_then(Value::as_f64)
    }

    /// The item's title, when present.
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }
}

/// Generates a new line item key.
pub fn new_keyid() -> String {
    Uuid::new_v4().to_string()
}

/// Sums the `price` of every item. Items without a numeric price count as 0.
pub fn cart_total(items: &[LineItem]) -> f64 {
    items.iter().filter_map(LineItem::price).sum()
}

// =============================================================================
// Offers
// =============================================================================

/// The three discount strategies the offers endpoint can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferKind {
    /// Percentage off the whole cart.
    Percentage,

    /// Fixed amount off the whole cart.
    Minus,

    /// Fixed amount off for every full `slice_value` spent.
    Slice,

    /// Any kind this version does not know about. Ignored when pricing.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for OfferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferKind::Percentage => write!(f, "percentage"),
            OfferKind::Minus => write!(f, "minus"),
            OfferKind::Slice => write!(f, "slice"),
            OfferKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single discount rule.
///
/// ## Wire Format
/// ```json
/// { "type": "percentage", "value": 5 }
/// { "type": "minus", "value": 15 }
/// { "type": "slice", "sliceValue": 100, "value": 12 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "type")]
    pub kind: OfferKind,

    #[serde(default)]
    pub value: f64,

    /// Slice width, only meaningful for [`OfferKind::Slice`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_value: Option<f64>,
}

impl Offer {
    pub fn percentage(value: f64) -> Self {
        Offer {
            kind: OfferKind::Percentage,
            value,
            slice_value: None,
        }
    }

    pub fn minus(value: f64) -> Self {
        Offer {
            kind: OfferKind::Minus,
            value,
            slice_value: None,
        }
    }

    pub fn slice(slice_value: f64, value: f64) -> Self {
        Offer {
            kind: OfferKind::Slice,
            value,
            slice_value: Some(slice_value),
        }
    }
}

/// Success body of the commercial offers endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommercialOffers {
    #[serde(default)]
    pub offers: Vec<Offer>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> ItemPayload {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_from_payload_assigns_keyid_and_keeps_fields() {
        let item = LineItem::from_payload(payload(json!({
            "isbn": "c8fabf68-8374-48fe-a7ea-a00ccd07afff",
            "title": "Henri Potier à l'école des sorciers",
            "price": 35,
            "keyid": "forged"
        })))
        .unwrap();

        assert_eq!(item.isbn, "c8fabf68-8374-48fe-a7ea-a00ccd07afff");
        assert_ne!(item.keyid, "forged");
        assert!(Uuid::parse_str(&item.keyid).is_ok());
        assert_eq!(item.price(), Some(35.0));
        assert_eq!(item.title(), Some("Henri Potier à l'école des sorciers"));
        assert!(!item.fields.contains_key("isbn"));
        assert!(!item.fields.contains_key("keyid"));
    }

    #[test]
    fn test_from_payload_requires_isbn() {
        let err = LineItem::from_payload(payload(json!({ "title": "x" }))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "isbn".to_string()
            }
        );

        let err = LineItem::from_payload(payload(json!({ "isbn": 42 }))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_line_item_json_round_trip() {
        let raw = json!({
            "isbn": "a460afed-e5e7-4e39-a39d-c885c05db861",
            "keyid": "3f1c9a2e-0000-4000-8000-000000000001",
            "title": "Henri Potier et la Chambre des secrets",
            "price": 30,
            "synopsis": ["Deuxième année", "à Poudlard"]
        });

        let item: LineItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_cart_total_skips_missing_prices() {
        let items: Vec<LineItem> = serde_json::from_value(json!([
            { "isbn": "a", "keyid": "1", "price": 35 },
            { "isbn": "b", "keyid": "2", "price": 30.5 },
            { "isbn": "c", "keyid": "3" },
            { "isbn": "d", "keyid": "4", "price": "free" }
        ]))
        .unwrap();

        assert_eq!(cart_total(&items), 65.5);
        assert_eq!(cart_total(&[]), 0.0);
    }

    #[test]
    fn test_offer_wire_format() {
        let body = json!({
            "offers": [
                { "type": "percentage", "value": 5 },
                { "type": "minus", "value": 15 },
                { "type": "slice", "sliceValue": 100, "value": 12 },
                { "type": "bogo", "value": 1 }
            ]
        });

        let parsed: CommercialOffers = serde_json::from_value(body).unwrap();
        assert_eq!(
            parsed.offers,
            vec![
                Offer::percentage(5.0),
                Offer::minus(15.0),
                Offer::slice(100.0, 12.0),
                Offer {
                    kind: OfferKind::Unknown,
                    value: 1.0,
                    slice_value: None
                },
            ]
        );

        let slice = serde_json::to_value(Offer::slice(100.0, 12.0)).unwrap();
        assert_eq!(slice, json!({ "type": "slice", "value": 12.0, "sliceValue": 100.0 }));
    }
}
