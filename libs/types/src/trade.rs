//! Trade submission lifecycle types
//!
//! A submission moves through three shapes: [`TradeDraft`] (lenient view of
//! whatever the client sent), [`TradeIntent`] (shape-checked, ready for
//! verification), and on success [`VerifiedOrder`] (the durable row).
//! Failures at any point are snapshotted as an [`AuditRecord`].

use crate::errors::RejectReason;
use crate::platform::Platform;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lenient view of a submission's payload, before any shape check.
///
/// Every field is optional: a missing, null, or wrongly-typed value simply
/// stays `None`. Audit records are built from this shape, so the logging
/// path never assumes shape-checked input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeDraft {
    pub platform: Option<String>,
    pub sender_pk: Option<String>,
    pub receiver_pk: Option<String>,
    pub buy_currency: Option<String>,
    pub sell_currency: Option<String>,
    pub buy_amount: Option<Decimal>,
    pub sell_amount: Option<Decimal>,
}

impl TradeDraft {
    /// Names of required fields that are absent or unusable.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.sender_pk.is_none() {
            missing.push("sender_pk");
        }
        if self.receiver_pk.is_none() {
            missing.push("receiver_pk");
        }
        if self.buy_currency.is_none() {
            missing.push("buy_currency");
        }
        if self.sell_currency.is_none() {
            missing.push("sell_currency");
        }
        if self.buy_amount.is_none() {
            missing.push("buy_amount");
        }
        if self.sell_amount.is_none() {
            missing.push("sell_amount");
        }
        if self.platform.is_none() {
            missing.push("platform");
        }
        missing
    }

    /// Promote to a [`TradeIntent`], enforcing the shape invariant.
    ///
    /// All seven fields must be present, and the platform tag must resolve
    /// within the closed enum. The unrecognized-platform case is a defined
    /// rejection here, not a fall-through.
    pub fn resolve(&self) -> Result<TradeIntent, RejectReason> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(RejectReason::MissingField(missing.join(", ")));
        }

        // Shape invariant holds from here on; clone out of the options.
        let tag = self.platform.clone().unwrap_or_default();
        let platform = Platform::from_tag(&tag)
            .ok_or_else(|| RejectReason::UnknownPlatform(tag))?;

        Ok(TradeIntent {
            platform,
            sender_pk: self.sender_pk.clone().unwrap_or_default(),
            receiver_pk: self.receiver_pk.clone().unwrap_or_default(),
            buy_currency: self.buy_currency.clone().unwrap_or_default(),
            sell_currency: self.sell_currency.clone().unwrap_or_default(),
            buy_amount: self.buy_amount.unwrap_or_default(),
            sell_amount: self.sell_amount.unwrap_or_default(),
        })
    }
}

/// A shape-checked trade submission, ready for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeIntent {
    pub platform: Platform,
    pub sender_pk: String,
    pub receiver_pk: String,
    pub buy_currency: String,
    pub sell_currency: String,
    pub buy_amount: Decimal,
    pub sell_amount: Decimal,
}

/// A trade whose signature validated against its canonical message.
///
/// The only creation path is successful verification; rows are immutable and
/// never updated or deleted. The platform tag is deliberately not stored.
/// The signature is kept raw, exactly as submitted (platform prefix
/// included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedOrder {
    pub sender_pk: String,
    pub receiver_pk: String,
    pub buy_currency: String,
    pub sell_currency: String,
    pub buy_amount: Decimal,
    pub sell_amount: Decimal,
    pub signature: String,
}

impl VerifiedOrder {
    /// Build the durable row from a verified intent and its raw signature.
    pub fn from_intent(intent: &TradeIntent, raw_signature: &str) -> Self {
        Self {
            sender_pk: intent.sender_pk.clone(),
            receiver_pk: intent.receiver_pk.clone(),
            buy_currency: intent.buy_currency.clone(),
            sell_currency: intent.sell_currency.clone(),
            buy_amount: intent.buy_amount,
            sell_amount: intent.sell_amount,
            signature: raw_signature.to_string(),
        }
    }
}

/// Snapshot of a rejected or malformed submission.
///
/// All trade fields are optional: the record must be constructible from
/// whatever subset of the payload was present, including the field that
/// caused the rejection being the one that is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub platform: Option<String>,
    pub sender_pk: Option<String>,
    pub receiver_pk: Option<String>,
    pub buy_currency: Option<String>,
    pub sell_currency: Option<String>,
    pub buy_amount: Option<Decimal>,
    pub sell_amount: Option<Decimal>,
    /// Why the submission was rejected.
    pub reason: String,
    /// When the rejection was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Snapshot a draft at rejection time.
    pub fn from_draft(draft: &TradeDraft, reason: &RejectReason) -> Self {
        Self {
            platform: draft.platform.clone(),
            sender_pk: draft.sender_pk.clone(),
            receiver_pk: draft.receiver_pk.clone(),
            buy_currency: draft.buy_currency.clone(),
            sell_currency: draft.sell_currency.clone(),
            buy_amount: draft.buy_amount,
            sell_amount: draft.sell_amount,
            reason: reason.to_string(),
            recorded_at: Utc::now(),
        }
    }

    /// Serialize to the JSON form stored in the audit journal.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("AuditRecord serialization must not fail")
    }
}
