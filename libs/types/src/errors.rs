//! Rejection taxonomy
//!
//! Every way a submission can fail short of a storage outage. All variants
//! are recoverable: they route to an audit write and a negative response,
//! never a crash. The caller only ever sees a boolean; these reasons are
//! captured in the audit log.

use thiserror::Error;

/// Why a submission was rejected instead of persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// A required top-level or payload field is absent, null, or unusable.
    #[error("missing or malformed field(s): {0}")]
    MissingField(String),

    /// The submission body is not a JSON object of the expected shape.
    #[error("submission body is not a JSON object")]
    MalformedSubmission,

    /// The platform tag matches neither known platform.
    #[error("unknown platform tag: {0}")]
    UnknownPlatform(String),

    /// The signature string cannot be decoded for the claimed platform.
    #[error("signature encoding is malformed")]
    MalformedSignature,

    /// The claimed sender key does not decode as a platform-native key.
    #[error("sender key is not a valid platform address")]
    InvalidSenderKey,

    /// The signature does not validate over the canonical message.
    #[error("signature does not verify against the canonical message")]
    SignatureMismatch,

    /// Recovery succeeded but yielded a different signer than claimed.
    #[error("recovered signer does not match the claimed sender")]
    SignerMismatch,
}
