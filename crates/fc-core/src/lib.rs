//! Filter Combiner Core Library
//!
//! Shared building blocks for combining filter lists: the classified form of a
//! normalized line and the fingerprint used to deduplicate rules across sources.
//!
//! # Modules
//!
//! - `hash`: XXH3-128 fingerprints of normalized rules
//! - `types`: Parsed line and discard reason definitions

pub mod hash;
pub mod types;

// Re-export commonly used types
pub use hash::{fingerprint, Fingerprint};
pub use types::{DiscardReason, ParsedLine};
