//! Verification dispatch
//!
//! Selects the canonicalization profile and verifier for a shape-checked
//! intent and reduces the outcome to a single verdict. The platform tag is
//! already resolved into the closed enum by the time an intent exists, so
//! dispatch itself cannot fall through.

use crate::{algorand, canonical, ethereum, SigningError};
use types::errors::RejectReason;
use types::platform::Platform;
use types::trade::TradeIntent;

/// Outcome of dispatching one submission through its platform verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The signature validated over the canonical message.
    Pass,
    /// Verification failed; the reason is audit detail only.
    Fail(RejectReason),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Canonicalize the intent for its platform and run the matching verifier.
pub fn verify_intent(intent: &TradeIntent, signature: &str) -> Verdict {
    let message = canonical::message_bytes(intent);
    let result = match intent.platform {
        Platform::Algorand => algorand::verify_bytes(&message, signature, &intent.sender_pk),
        Platform::Ethereum => ethereum::verify_personal(&message, signature, &intent.sender_pk),
    };
    match result {
        Ok(()) => Verdict::Pass,
        Err(err) => Verdict::Fail(reject_reason(err)),
    }
}

fn reject_reason(err: SigningError) -> RejectReason {
    match err {
        SigningError::InvalidAddress => RejectReason::InvalidSenderKey,
        SigningError::InvalidSignature => RejectReason::MalformedSignature,
        SigningError::VerificationFailed => RejectReason::SignatureMismatch,
        SigningError::SignerMismatch { .. } => RejectReason::SignerMismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use rust_decimal::Decimal;

    fn intent(platform: Platform, sender_pk: String) -> TradeIntent {
        TradeIntent {
            platform,
            sender_pk,
            receiver_pk: "RECEIVER".to_string(),
            buy_currency: "BTC".to_string(),
            sell_currency: "ETH".to_string(),
            buy_amount: Decimal::from(1),
            sell_amount: Decimal::from(10),
        }
    }

    #[test]
    fn test_algorand_roundtrip_passes() {
        let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let sender = algorand::encode_address(&key.verifying_key());
        let intent = intent(Platform::Algorand, sender);

        let sig = algorand::sign_bytes(&canonical::message_bytes(&intent), &key);
        assert_eq!(verify_intent(&intent, &sig), Verdict::Pass);
    }

    #[test]
    fn test_ethereum_roundtrip_passes() {
        let key = k256::ecdsa::SigningKey::random(&mut OsRng);
        let sender = ethereum::address_of(key.verifying_key());
        let intent = intent(Platform::Ethereum, sender);

        let sig = ethereum::sign_personal(&canonical::message_bytes(&intent), &key);
        assert_eq!(verify_intent(&intent, &sig), Verdict::Pass);
    }

    #[test]
    fn test_signature_over_other_profile_fails() {
        // A signature over profile B bytes must not verify a profile A intent
        let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let sender = algorand::encode_address(&key.verifying_key());
        let intent_a = intent(Platform::Algorand, sender.clone());
        let mut intent_b = intent_a.clone();
        intent_b.platform = Platform::Ethereum;

        let sig = algorand::sign_bytes(&canonical::message_bytes(&intent_b), &key);
        assert_eq!(
            verify_intent(&intent_a, &sig),
            Verdict::Fail(RejectReason::SignatureMismatch)
        );
    }

    #[test]
    fn test_field_change_after_signing_fails() {
        let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let sender = algorand::encode_address(&key.verifying_key());
        let mut intent = intent(Platform::Algorand, sender);

        let sig = algorand::sign_bytes(&canonical::message_bytes(&intent), &key);
        intent.buy_amount = Decimal::from(2);
        assert!(!verify_intent(&intent, &sig).is_pass());
    }

    #[test]
    fn test_garbage_signature_is_rejected_not_fatal() {
        let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let sender = algorand::encode_address(&key.verifying_key());
        let intent = intent(Platform::Algorand, sender);
        assert_eq!(
            verify_intent(&intent, "@@not-a-signature@@"),
            Verdict::Fail(RejectReason::MalformedSignature)
        );
    }
}
