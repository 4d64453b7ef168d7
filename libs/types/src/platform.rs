//! Supported signing platforms
//!
//! The platform tag is the discriminator selecting which signature scheme
//! and which canonicalization profile applies to a submission.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed enumeration of the supported platforms.
///
/// Submissions carry the tag as a free-form string; it is resolved into this
/// enum exactly once, at shape-check time, via [`Platform::from_tag`].
/// Unrecognized tags never reach the verification layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Ed25519 signatures over base32 addresses
    Algorand,
    /// secp256k1 personal-message signatures with address recovery
    Ethereum,
}

impl Platform {
    /// Resolve a wire tag case-insensitively.
    ///
    /// Returns `None` for anything outside the closed set — the caller must
    /// map that to a defined rejection, never a silent no-op.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "algorand" => Some(Platform::Algorand),
            "ethereum" => Some(Platform::Ethereum),
            _ => None,
        }
    }

    /// Canonical tag used in signed messages and audit snapshots.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Platform::Algorand => "Algorand",
            Platform::Ethereum => "Ethereum",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_exact() {
        assert_eq!(Platform::from_tag("Algorand"), Some(Platform::Algorand));
        assert_eq!(Platform::from_tag("Ethereum"), Some(Platform::Ethereum));
    }

    #[test]
    fn test_from_tag_case_insensitive() {
        assert_eq!(Platform::from_tag("algorand"), Some(Platform::Algorand));
        assert_eq!(Platform::from_tag("ETHEREUM"), Some(Platform::Ethereum));
        assert_eq!(Platform::from_tag("  ethereum "), Some(Platform::Ethereum));
    }

    #[test]
    fn test_from_tag_unknown() {
        assert_eq!(Platform::from_tag("Solana"), None);
        assert_eq!(Platform::from_tag(""), None);
    }

    #[test]
    fn test_wire_name_roundtrip() {
        for platform in [Platform::Algorand, Platform::Ethereum] {
            assert_eq!(Platform::from_tag(platform.wire_name()), Some(platform));
        }
    }
}
