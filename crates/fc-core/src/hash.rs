//! Rule fingerprints for Filter Combiner
//!
//! A fingerprint is the 128-bit XXH3 digest of a normalized rule's UTF-8 bytes.
//! It is the deduplication key: equal rule text always yields an equal
//! fingerprint, and at 128 bits collisions between human-authored filter
//! rules are not a practical concern.

use twox_hash::xxh3;

/// 128-bit fingerprint represented as two 64-bit parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint {
    pub lo: u64,
    pub hi: u64,
}

impl Fingerprint {
    /// Convert to a single u128.
    #[inline]
    pub const fn to_u128(&self) -> u128 {
        ((self.hi as u128) << 64) | (self.lo as u128)
    }

    /// Create from a u128.
    #[inline]
    pub const fn from_u128(v: u128) -> Self {
        Self {
            lo: v as u64,
            hi: (v >> 64) as u64,
        }
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", self.to_u128())
    }
}

/// Fingerprint a normalized rule.
///
/// The rule is hashed byte-for-byte; no case folding or trimming happens here,
/// that is the normalizer's job.
#[inline]
pub fn fingerprint(rule: &str) -> Fingerprint {
    Fingerprint::from_u128(xxh3::hash128(rule.as_bytes()))
}
