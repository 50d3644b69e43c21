use log::{debug, info};

use fc_compiler::{Combiner, RuleStats};

use crate::config::Config;
use crate::error::CombineError;
use crate::fetch::Fetcher;
use crate::output::write_output;
use crate::sources::load_source_list;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sources: usize,
    pub empty_sources: usize,
    pub lines_written: usize,
    pub totals: RuleStats,
}

/// Fetches every source in list order, combines them behind the header and
/// overrides, and writes the result.
///
/// Only a missing source list or a failed write ends the run early; neither
/// touches an existing output file.
pub fn run_combine(
    config: &Config,
    fetcher: &dyn Fetcher,
    generated_at: &str,
) -> Result<RunSummary, CombineError> {
    let sources = load_source_list(&config.source_list_path)?;

    let mut combiner = Combiner::new(generated_at, &config.header_lines());
    let override_stats = combiner.add_overrides(&config.overrides);
    if override_stats.lines > 0 {
        debug!(
            "Overrides: {} lines, {} rules",
            override_stats.lines, override_stats.emitted
        );
    }

    let mut empty_sources = 0usize;
    for url in &sources {
        info!("Fetching {}", url);
        let text = fetcher.fetch(url);
        if text.is_empty() {
            empty_sources += 1;
            continue;
        }

        let stats = combiner.add_source(&text);
        debug!(
            "  {} - {} lines, {} rules, {} duplicates",
            url, stats.lines, stats.emitted, stats.duplicates
        );
    }

    let totals = *combiner.totals();
    let doc = combiner.finish();
    write_output(&config.output_path, &doc)?;

    info!(
        "Wrote {} lines to {}",
        doc.line_count(),
        config.output_path.display()
    );

    Ok(RunSummary {
        sources: sources.len(),
        empty_sources,
        lines_written: doc.line_count(),
        totals,
    })
}
