//! Wire models
//!
//! The submission model is deliberately lenient: a malformed body must end
//! up in the audit log with a `false` acknowledgment, not bounce off the
//! deserializer as a transport error. Every field is extracted on a
//! best-effort basis and shape enforcement happens in the intake workflow.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use types::trade::{TradeDraft, VerifiedOrder};

/// Best-effort view of a raw submission body.
#[derive(Debug, Default)]
pub struct RawSubmission {
    /// Whether the body was a JSON object at all.
    pub is_object: bool,
    /// Top-level `sig`, if present as a string.
    pub sig: Option<String>,
    /// Whether a `payload` object was present at the top level.
    pub has_payload: bool,
    /// Lenient view of the payload fields.
    pub draft: TradeDraft,
}

impl RawSubmission {
    pub fn from_value(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::default();
        };

        let sig = object.get("sig").and_then(Value::as_str).map(str::to_string);
        let (has_payload, draft) = match object.get("payload").and_then(Value::as_object) {
            Some(payload) => (true, draft_from(payload)),
            None => (false, TradeDraft::default()),
        };

        Self {
            is_object: true,
            sig,
            has_payload,
            draft,
        }
    }
}

fn draft_from(payload: &Map<String, Value>) -> TradeDraft {
    TradeDraft {
        platform: string_field(payload, "platform"),
        sender_pk: string_field(payload, "sender_pk"),
        receiver_pk: string_field(payload, "receiver_pk"),
        buy_currency: string_field(payload, "buy_currency"),
        sell_currency: string_field(payload, "sell_currency"),
        buy_amount: amount_field(payload, "buy_amount"),
        sell_amount: amount_field(payload, "sell_amount"),
    }
}

fn string_field(payload: &Map<String, Value>, name: &str) -> Option<String> {
    payload.get(name).and_then(Value::as_str).map(str::to_string)
}

/// Amounts arrive as JSON numbers from the platform clients, but a numeric
/// string is accepted too. Anything else is treated as absent.
fn amount_field(payload: &Map<String, Value>, name: &str) -> Option<Decimal> {
    match payload.get(name)? {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// `GET /order_book` response envelope.
#[derive(Debug, Serialize)]
pub struct OrderBookResponse {
    pub data: Vec<VerifiedOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_submission_extraction() {
        let body = json!({
            "sig": "abc",
            "payload": {
                "sender_pk": "A",
                "receiver_pk": "B",
                "buy_currency": "BTC",
                "sell_currency": "ETH",
                "buy_amount": 1,
                "sell_amount": 10.5,
                "platform": "Algorand",
            }
        });
        let submission = RawSubmission::from_value(&body);
        assert!(submission.is_object);
        assert_eq!(submission.sig.as_deref(), Some("abc"));
        assert!(submission.has_payload);
        assert!(submission.draft.missing_fields().is_empty());
        assert_eq!(submission.draft.buy_amount, Some(Decimal::from(1)));
        assert_eq!(submission.draft.sell_amount, Some("10.5".parse().unwrap()));
    }

    #[test]
    fn test_non_object_body() {
        let submission = RawSubmission::from_value(&json!([1, 2, 3]));
        assert!(!submission.is_object);
        assert!(submission.sig.is_none());
        assert!(!submission.has_payload);
    }

    #[test]
    fn test_missing_payload_field_stays_none() {
        let body = json!({
            "sig": "abc",
            "payload": { "sender_pk": "A", "platform": "Ethereum" }
        });
        let submission = RawSubmission::from_value(&body);
        assert!(submission.has_payload);
        assert_eq!(submission.draft.sender_pk.as_deref(), Some("A"));
        assert!(submission.draft.buy_amount.is_none());
        assert!(submission
            .draft
            .missing_fields()
            .contains(&"receiver_pk"));
    }

    #[test]
    fn test_wrongly_typed_fields_stay_none() {
        let body = json!({
            "sig": 42,
            "payload": {
                "sender_pk": ["not", "a", "string"],
                "buy_amount": true,
            }
        });
        let submission = RawSubmission::from_value(&body);
        assert!(submission.sig.is_none());
        assert!(submission.draft.sender_pk.is_none());
        assert!(submission.draft.buy_amount.is_none());
    }

    #[test]
    fn test_amount_accepts_numeric_string() {
        let body = json!({
            "sig": "s",
            "payload": { "buy_amount": "2.5" }
        });
        let submission = RawSubmission::from_value(&body);
        assert_eq!(submission.draft.buy_amount, Some("2.5".parse().unwrap()));
    }
}
