//! Sigcore — Canonicalization and Signature Verification
//!
//! Provides deterministic canonical-message construction and the two
//! platform signature schemes:
//! - Algorand: Ed25519 over base32 addresses with SHA-512/256 checksums
//! - Ethereum: secp256k1 personal-message recovery with EIP-55 addresses
//!
//! # Determinism
//! Canonicalization is pure: the same intent always yields byte-identical
//! output. Verification never panics on malformed input; every decode
//! failure is a typed error that the caller maps to a rejection.

pub mod algorand;
pub mod canonical;
pub mod dispatch;
pub mod ethereum;

/// Crate version constant
pub const SIGCORE_VERSION: &str = "1.0.0";

/// Signature-layer errors.
///
/// Every variant is a verification failure from the caller's point of view;
/// none of them abort a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningError {
    #[error("sender key is not a valid platform address")]
    InvalidAddress,

    #[error("signature encoding is malformed")]
    InvalidSignature,

    #[error("signature verification failed")]
    VerificationFailed,

    #[error("recovered signer {recovered} does not match claimed sender {expected}")]
    SignerMismatch { expected: String, recovered: String },
}
