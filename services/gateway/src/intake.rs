//! Order intake workflow
//!
//! One submission moves through {Received, ShapeChecked, Verified,
//! Rejected, Persisted}:
//!
//! - Received → ShapeChecked: `sig` and `payload` present at the top level,
//!   all seven payload fields present, platform tag within the closed set.
//!   Any failure writes an audit snapshot of whatever was present and
//!   acknowledges `false`; verification is never attempted.
//! - ShapeChecked → Verified | Rejected: signature dispatch.
//! - Verified → Persisted: durable order write, acknowledge `true`.
//! - Rejected → audit write, acknowledge `false`.
//!
//! Each submission is processed exactly once and writes exactly one record.
//! Storage failures are the only error path out of this module; they abort
//! the request instead of masquerading as a rejection.

use crate::models::RawSubmission;
use orderstore::{OrderStore, StoreError};
use sigcore::dispatch::{self, Verdict};
use types::errors::RejectReason;
use types::trade::{AuditRecord, TradeDraft, VerifiedOrder};

/// Process one submission end to end, returning the acknowledgment boolean.
pub fn process(store: &mut OrderStore, body: &serde_json::Value) -> Result<bool, StoreError> {
    let submission = RawSubmission::from_value(body);

    if !submission.is_object {
        return reject(store, &submission.draft, &RejectReason::MalformedSubmission);
    }

    if submission.sig.is_none() || !submission.has_payload {
        let mut missing = Vec::new();
        if submission.sig.is_none() {
            missing.push("sig");
        }
        if !submission.has_payload {
            missing.push("payload");
        }
        let reason = RejectReason::MissingField(missing.join(", "));
        return reject(store, &submission.draft, &reason);
    }

    // Shape check: all seven payload fields + platform resolution
    let intent = match submission.draft.resolve() {
        Ok(intent) => intent,
        Err(reason) => return reject(store, &submission.draft, &reason),
    };
    let raw_sig = submission.sig.as_deref().unwrap_or_default();

    match dispatch::verify_intent(&intent, raw_sig) {
        Verdict::Pass => {
            store.append_order(&VerifiedOrder::from_intent(&intent, raw_sig))?;
            tracing::info!(
                platform = %intent.platform,
                sender = %intent.sender_pk,
                "order verified and persisted"
            );
            Ok(true)
        }
        Verdict::Fail(reason) => reject(store, &submission.draft, &reason),
    }
}

fn reject(
    store: &mut OrderStore,
    draft: &TradeDraft,
    reason: &RejectReason,
) -> Result<bool, StoreError> {
    tracing::warn!(%reason, "submission rejected");
    store.append_audit(&AuditRecord::from_draft(draft, reason))?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use types::platform::Platform;
    use types::trade::TradeIntent;

    fn algorand_intent(sender_pk: String) -> TradeIntent {
        TradeIntent {
            platform: Platform::Algorand,
            sender_pk,
            receiver_pk: "RECEIVER".to_string(),
            buy_currency: "BTC".to_string(),
            sell_currency: "ETH".to_string(),
            buy_amount: Decimal::from(1),
            sell_amount: Decimal::from(10),
        }
    }

    fn submission_body(intent: &TradeIntent, sig: &str) -> Value {
        json!({
            "sig": sig,
            "payload": {
                "sender_pk": intent.sender_pk,
                "receiver_pk": intent.receiver_pk,
                "buy_currency": intent.buy_currency,
                "sell_currency": intent.sell_currency,
                "buy_amount": 1,
                "sell_amount": 10,
                "platform": intent.platform.wire_name(),
            }
        })
    }

    #[test]
    fn test_valid_algorand_submission_persists() {
        let tmp = TempDir::new().unwrap();
        let mut store = OrderStore::open(tmp.path()).unwrap();

        let key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
        let intent = algorand_intent(sigcore::algorand::encode_address(&key.verifying_key()));
        let sig = sigcore::algorand::sign_bytes(&sigcore::canonical::message_bytes(&intent), &key);

        let accepted = process(&mut store, &submission_body(&intent, &sig)).unwrap();
        assert!(accepted);
        assert_eq!(store.len(), 1);
        assert_eq!(store.orders()[0].signature, sig);
        assert_eq!(store.audit_count(), 0);
    }

    #[test]
    fn test_corrupted_signature_is_audited() {
        let tmp = TempDir::new().unwrap();
        let mut store = OrderStore::open(tmp.path()).unwrap();

        let key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
        let intent = algorand_intent(sigcore::algorand::encode_address(&key.verifying_key()));
        let sig = sigcore::algorand::sign_bytes(&sigcore::canonical::message_bytes(&intent), &key);
        let corrupted = format!("AA{}", &sig[2..]);

        let accepted = process(&mut store, &submission_body(&intent, &corrupted)).unwrap();
        assert!(!accepted);
        assert!(store.is_empty());
        assert_eq!(store.audit_count(), 1);
    }

    #[test]
    fn test_missing_payload_field_never_reaches_verification() {
        let tmp = TempDir::new().unwrap();
        let mut store = OrderStore::open(tmp.path()).unwrap();

        let body = json!({
            "sig": "irrelevant",
            "payload": {
                "sender_pk": "A",
                "receiver_pk": "B",
                "buy_currency": "BTC",
                "sell_currency": "ETH",
                "sell_amount": 10,
                "platform": "Algorand",
            }
        });
        let accepted = process(&mut store, &body).unwrap();
        assert!(!accepted);
        assert!(store.is_empty());
        assert_eq!(store.audit_count(), 1);
    }

    #[test]
    fn test_missing_top_level_fields() {
        let tmp = TempDir::new().unwrap();
        let mut store = OrderStore::open(tmp.path()).unwrap();

        assert!(!process(&mut store, &json!({ "payload": {} })).unwrap());
        assert!(!process(&mut store, &json!({ "sig": "abc" })).unwrap());
        assert_eq!(store.audit_count(), 2);
    }

    #[test]
    fn test_unknown_platform_is_rejected_with_audit() {
        let tmp = TempDir::new().unwrap();
        let mut store = OrderStore::open(tmp.path()).unwrap();

        let mut body = submission_body(&algorand_intent("SENDER".to_string()), "sig");
        body["payload"]["platform"] = json!("Solana");

        let accepted = process(&mut store, &body).unwrap();
        assert!(!accepted);
        assert!(store.is_empty());
        assert_eq!(store.audit_count(), 1);
    }

    #[test]
    fn test_non_object_body_is_rejected_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let mut store = OrderStore::open(tmp.path()).unwrap();

        for body in [Value::Null, json!("string"), json!([1, 2])] {
            assert!(!process(&mut store, &body).unwrap());
        }
        assert_eq!(store.audit_count(), 3);
    }
}
