//! Canonical message construction
//!
//! Builds the exact byte sequence a client must have signed for a trade
//! intent. Two profiles exist, keyed by platform; their field orderings are
//! fixed external contracts inherited from each platform's reference signing
//! client and must not be unified. The canonical byte representation is the
//! compact UTF-8 JSON produced by `serde_json` over the profile struct, with
//! amounts rendered as decimal strings.
//!
//! This is a byte-exact preimage for signature verification, not a
//! general-purpose serialization: any reordering, type coercion, or
//! whitespace difference between signer and verifier produces a false
//! rejection.

use rust_decimal::Decimal;
use serde::Serialize;
use types::platform::Platform;
use types::trade::TradeIntent;

/// Algorand profile: buy_amount precedes sell_amount.
#[derive(Serialize)]
struct AlgorandProfile<'a> {
    platform: &'a str,
    sender_pk: &'a str,
    receiver_pk: &'a str,
    buy_currency: &'a str,
    sell_currency: &'a str,
    buy_amount: &'a Decimal,
    sell_amount: &'a Decimal,
}

/// Ethereum profile: sell_amount precedes buy_amount.
///
/// The swapped tail is inherited from the Ethereum reference client's
/// signing dictionary. Clients sign this ordering; changing it here would
/// reject every valid Ethereum submission.
#[derive(Serialize)]
struct EthereumProfile<'a> {
    platform: &'a str,
    sender_pk: &'a str,
    receiver_pk: &'a str,
    buy_currency: &'a str,
    sell_currency: &'a str,
    sell_amount: &'a Decimal,
    buy_amount: &'a Decimal,
}

/// Serialize an intent to its canonical signed-message bytes.
pub fn message_bytes(intent: &TradeIntent) -> Vec<u8> {
    let platform = intent.platform.wire_name();
    let result = match intent.platform {
        Platform::Algorand => serde_json::to_vec(&AlgorandProfile {
            platform,
            sender_pk: &intent.sender_pk,
            receiver_pk: &intent.receiver_pk,
            buy_currency: &intent.buy_currency,
            sell_currency: &intent.sell_currency,
            buy_amount: &intent.buy_amount,
            sell_amount: &intent.sell_amount,
        }),
        Platform::Ethereum => serde_json::to_vec(&EthereumProfile {
            platform,
            sender_pk: &intent.sender_pk,
            receiver_pk: &intent.receiver_pk,
            buy_currency: &intent.buy_currency,
            sell_currency: &intent.sell_currency,
            sell_amount: &intent.sell_amount,
            buy_amount: &intent.buy_amount,
        }),
    };
    result.expect("canonical message serialization must not fail")
}
