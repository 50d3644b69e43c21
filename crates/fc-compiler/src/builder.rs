use log::debug;

use fc_core::types::ParsedLine;

use crate::dedup::Deduplicator;
use crate::parser::{parse_line, split_lines};

/// Prefix of the first header line; the run timestamp follows it.
pub const GENERATED_MARKER: &str = "! Combined filter list generated";

/// Line counters for one source, the overrides, or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleStats {
    pub lines: usize,
    pub discarded: usize,
    pub hosts_converted: usize,
    pub duplicates: usize,
    pub emitted: usize,
}

impl RuleStats {
    fn absorb(&mut self, other: &RuleStats) {
        self.lines += other.lines;
        self.discarded += other.discarded;
        self.hosts_converted += other.hosts_converted;
        self.duplicates += other.duplicates;
        self.emitted += other.emitted;
    }
}

/// Assembles the combined list: header, overrides, then every source in the
/// order it is added.
pub struct Combiner {
    lines: Vec<String>,
    header_len: usize,
    dedup: Deduplicator,
    totals: RuleStats,
}

impl Combiner {
    /// Starts a document with the generation marker, the descriptive header
    /// lines and a separating blank line.
    pub fn new(generated_at: &str, header_lines: &[String]) -> Self {
        let mut lines = Vec::with_capacity(header_lines.len() + 2);
        lines.push(format!("{} {}", GENERATED_MARKER, generated_at));
        lines.extend(header_lines.iter().cloned());
        lines.push(String::new());

        Self {
            header_len: lines.len(),
            lines,
            dedup: Deduplicator::new(),
            totals: RuleStats::default(),
        }
    }

    /// Adds operator rules. Call before any source so these win over an
    /// equivalent fetched rule.
    pub fn add_overrides<I, S>(&mut self, rules: I) -> RuleStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = RuleStats::default();
        for rule in rules {
            self.push_line(rule.as_ref(), &mut stats);
        }
        self.totals.absorb(&stats);
        stats
    }

    /// Adds every surviving line of one fetched document, in document order.
    pub fn add_source(&mut self, text: &str) -> RuleStats {
        let mut stats = RuleStats::default();
        for raw_line in split_lines(text) {
            self.push_line(raw_line, &mut stats);
        }
        self.totals.absorb(&stats);
        stats
    }

    fn push_line(&mut self, raw_line: &str, stats: &mut RuleStats) {
        stats.lines += 1;

        let parsed = parse_line(raw_line);
        if matches!(parsed, ParsedLine::HostsBlock(_)) {
            stats.hosts_converted += 1;
        }

        let rule = match parsed.into_rule() {
            Some(rule) => rule,
            None => {
                stats.discarded += 1;
                return;
            }
        };

        if !self.dedup.insert(&rule) {
            stats.duplicates += 1;
            return;
        }

        stats.emitted += 1;
        self.lines.push(rule);
    }

    pub fn totals(&self) -> &RuleStats {
        &self.totals
    }

    pub fn finish(self) -> OutputDocument {
        debug!(
            "Combined {} lines: {} discarded, {} hosts converted, {} duplicates, {} rules",
            self.totals.lines,
            self.totals.discarded,
            self.totals.hosts_converted,
            self.totals.duplicates,
            self.totals.emitted
        );

        OutputDocument {
            lines: self.lines,
            header_len: self.header_len,
        }
    }
}

/// The finished combined list. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    lines: Vec<String>,
    header_len: usize,
}

impl OutputDocument {
    pub fn header(&self) -> &[String] {
        &self.lines[..self.header_len]
    }

    /// Overrides followed by source rules.
    pub fn rules(&self) -> &[String] {
        &self.lines[self.header_len..]
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Newline-joined text with a single trailing newline.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
