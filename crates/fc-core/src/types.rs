//! Core type definitions for Filter Combiner
//!
//! A raw line from a filter list is classified into a `ParsedLine`. Only the
//! rule-bearing variants survive into the combined output.

// =============================================================================
// Discard Reasons
// =============================================================================

/// Why a raw line produced no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscardReason {
    /// Empty or whitespace-only line
    Blank,
    /// `!` / `[` adblock comment or header, or `#` hosts comment
    Comment,
    /// Hosts-style line whose target domain was empty after stripping dots
    EmptyDomain,
}

// =============================================================================
// Parsed Lines
// =============================================================================

/// Classified result of normalizing one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Line carries no rule
    Discard(DiscardReason),
    /// Hosts-file entry, holds the lower-cased target domain
    HostsBlock(String),
    /// Native filter syntax in canonical form
    Native(String),
}

impl ParsedLine {
    /// Render the canonical rule text, or `None` for discarded lines.
    pub fn into_rule(self) -> Option<String> {
        match self {
            Self::Discard(_) => None,
            Self::HostsBlock(domain) => Some(format!("||{domain}^")),
            Self::Native(rule) => Some(rule),
        }
    }
}
