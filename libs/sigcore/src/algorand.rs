//! Algorand signature scheme (Verifier A)
//!
//! Ed25519 over the platform's native encodings: the sender key is a 58-char
//! base32 address wrapping a 32-byte public key plus a SHA-512/256 checksum,
//! and the signature is standard base64 of the 64-byte Ed25519 signature,
//! used as-is (no prefix stripping). Signed bytes carry the platform's `MX`
//! domain-separation prefix.

use crate::SigningError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use data_encoding::BASE32_NOPAD;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha512_256};

/// Length of a textual Algorand address.
pub const ADDRESS_LEN: usize = 58;

const PUBLIC_KEY_LEN: usize = 32;
const CHECKSUM_LEN: usize = 4;

/// Domain-separation prefix for arbitrary signed bytes.
const BYTES_SIGN_PREFIX: &[u8] = b"MX";

/// Decode an address into its Ed25519 verifying key.
///
/// Validates length, base32 encoding, and the SHA-512/256 checksum before
/// interpreting the key bytes.
pub fn decode_address(address: &str) -> Result<VerifyingKey, SigningError> {
    if address.len() != ADDRESS_LEN {
        return Err(SigningError::InvalidAddress);
    }
    let raw = BASE32_NOPAD
        .decode(address.as_bytes())
        .map_err(|_| SigningError::InvalidAddress)?;
    if raw.len() != PUBLIC_KEY_LEN + CHECKSUM_LEN {
        return Err(SigningError::InvalidAddress);
    }

    let (key_bytes, checksum) = raw.split_at(PUBLIC_KEY_LEN);
    if address_checksum(key_bytes) != checksum {
        return Err(SigningError::InvalidAddress);
    }

    let key_array: [u8; PUBLIC_KEY_LEN] = key_bytes
        .try_into()
        .map_err(|_| SigningError::InvalidAddress)?;
    VerifyingKey::from_bytes(&key_array).map_err(|_| SigningError::InvalidAddress)
}

/// Encode a verifying key as a checksummed base32 address.
pub fn encode_address(key: &VerifyingKey) -> String {
    let key_bytes = key.to_bytes();
    let mut raw = Vec::with_capacity(PUBLIC_KEY_LEN + CHECKSUM_LEN);
    raw.extend_from_slice(&key_bytes);
    raw.extend_from_slice(&address_checksum(&key_bytes));
    BASE32_NOPAD.encode(&raw)
}

/// Trailing 4 bytes of SHA-512/256 over the public key.
fn address_checksum(key_bytes: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha512_256::digest(key_bytes);
    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    checksum
}

/// Verify a base64 signature over `MX`-prefixed message bytes.
///
/// Returns `Ok(())` iff the signature is a valid Ed25519 signature over the
/// prefixed message under the key carried by `address`. Malformed encodings
/// report an error, never panic.
pub fn verify_bytes(
    message: &[u8],
    signature_b64: &str,
    address: &str,
) -> Result<(), SigningError> {
    let key = decode_address(address)?;

    let sig_bytes = BASE64
        .decode(signature_b64)
        .map_err(|_| SigningError::InvalidSignature)?;
    let sig_array: [u8; 64] = sig_bytes
        .try_into()
        .map_err(|_| SigningError::InvalidSignature)?;
    let signature = Signature::from_bytes(&sig_array);

    key.verify(&prefixed(message), &signature)
        .map_err(|_| SigningError::VerificationFailed)
}

/// Client-side counterpart of [`verify_bytes`]: sign message bytes and
/// return the base64 signature.
pub fn sign_bytes(message: &[u8], key: &SigningKey) -> String {
    let signature = key.sign(&prefixed(message));
    BASE64.encode(signature.to_bytes())
}

fn prefixed(message: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(BYTES_SIGN_PREFIX.len() + message.len());
    out.extend_from_slice(BYTES_SIGN_PREFIX);
    out.extend_from_slice(message);
    out
}
