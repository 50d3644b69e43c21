//! Filter Combiner List Compiler
//!
//! This crate normalizes adblock and hosts-file lines into canonical rules,
//! deduplicates them across sources and assembles the combined document.

pub mod parser;
pub mod dedup;
pub mod builder;

pub use builder::{Combiner, OutputDocument, RuleStats, GENERATED_MARKER};
pub use dedup::Deduplicator;
pub use parser::{looks_like_hosts_entry, normalize_line, parse_line, split_lines};
