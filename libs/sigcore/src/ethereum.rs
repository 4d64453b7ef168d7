//! Ethereum signature scheme (Verifier B)
//!
//! secp256k1 recovery over the EIP-191 personal-message envelope. The
//! signature arrives as `0x`-prefixed hex of the 65-byte r‖s‖v form; the
//! marker is stripped, the message is wrapped in the personal-signing
//! envelope and Keccak-256 hashed, and the signer's address is recovered
//! from the digest. Verification succeeds iff the recovered address equals
//! the claimed sender exactly (string equality against the EIP-55
//! checksummed form, no case folding).

use crate::SigningError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};

/// Two-character marker carried by wire signatures.
pub const SIGNATURE_MARKER: &str = "0x";

/// EIP-191 personal-message envelope prefix.
const PERSONAL_PREFIX: &str = "\x19Ethereum Signed Message:\n";

const SIGNATURE_LEN: usize = 65;
const ADDRESS_LEN: usize = 20;

/// Keccak-256 hash.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Digest of a message wrapped in the personal-signing envelope:
/// `"\x19Ethereum Signed Message:\n" + decimal-length + message`.
pub fn personal_digest(message: &[u8]) -> [u8; 32] {
    let length = message.len().to_string();
    let mut enveloped =
        Vec::with_capacity(PERSONAL_PREFIX.len() + length.len() + message.len());
    enveloped.extend_from_slice(PERSONAL_PREFIX.as_bytes());
    enveloped.extend_from_slice(length.as_bytes());
    enveloped.extend_from_slice(message);
    keccak256(&enveloped)
}

/// EIP-55 checksummed rendering of a 20-byte address.
pub fn checksum_address(bytes: &[u8; ADDRESS_LEN]) -> String {
    let lower = hex::encode(bytes);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str(SIGNATURE_MARKER);
    for (i, ch) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if ch.is_ascii_alphabetic() && nibble >= 8 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Derive the checksummed address of a verifying key: last 20 bytes of
/// Keccak-256 over the uncompressed key without its 0x04 tag.
pub fn address_of(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
    checksum_address(&address)
}

/// Recover the checksummed signer address from a wire signature.
///
/// The `0x` marker is required; its absence, bad hex, a wrong length, or an
/// out-of-range recovery id are all malformed-signature errors rather than
/// panics.
pub fn recover_personal(message: &[u8], signature: &str) -> Result<String, SigningError> {
    let body = signature
        .strip_prefix(SIGNATURE_MARKER)
        .ok_or(SigningError::InvalidSignature)?;
    let raw = hex::decode(body).map_err(|_| SigningError::InvalidSignature)?;
    if raw.len() != SIGNATURE_LEN {
        return Err(SigningError::InvalidSignature);
    }

    // v is accepted in both the legacy (27/28) and raw (0/1) forms
    let parity = match raw[SIGNATURE_LEN - 1] {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SigningError::InvalidSignature),
    };
    let recovery_id =
        RecoveryId::from_byte(parity).ok_or(SigningError::InvalidSignature)?;
    let sig = Signature::from_slice(&raw[..SIGNATURE_LEN - 1])
        .map_err(|_| SigningError::InvalidSignature)?;

    let digest = personal_digest(message);
    let key = VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id)
        .map_err(|_| SigningError::VerificationFailed)?;
    Ok(address_of(&key))
}

/// Verify that a wire signature over the message recovers the claimed
/// sender address. Equality is exact: the claimed address must match the
/// EIP-55 checksummed recovery result byte for byte.
pub fn verify_personal(
    message: &[u8],
    signature: &str,
    claimed: &str,
) -> Result<(), SigningError> {
    let recovered = recover_personal(message, signature)?;
    if recovered != claimed {
        return Err(SigningError::SignerMismatch {
            expected: claimed.to_string(),
            recovered,
        });
    }
    Ok(())
}

/// Client-side counterpart of [`verify_personal`]: sign message bytes and
/// return the `0x`-prefixed 65-byte wire signature.
pub fn sign_personal(message: &[u8], key: &SigningKey) -> String {
    let digest = personal_digest(message);
    let (sig, recovery_id) = key
        .sign_prehash_recoverable(&digest)
        .expect("signing over a 32-byte digest must not fail");

    let mut raw = [0u8; SIGNATURE_LEN];
    raw[..SIGNATURE_LEN - 1].copy_from_slice(&sig.to_bytes());
    raw[SIGNATURE_LEN - 1] = 27 + recovery_id.to_byte();
    format!("{}{}", SIGNATURE_MARKER, hex::encode(raw))
}
