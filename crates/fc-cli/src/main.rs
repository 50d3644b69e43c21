//! Filter Combiner CLI
//!
//! Downloads filter lists, normalizes and deduplicates their rules, and writes
//! one combined list.

mod config;
mod error;
mod fetch;
mod output;
mod run;
mod sources;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env, Target};
use log::{debug, warn};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use fc_compiler::{normalize_line, split_lines, Deduplicator};

use crate::config::{Config, ConfigLayer};
use crate::error::CombineError;
use crate::fetch::{decode_body, HttpFetcher};
use crate::run::run_combine;
use crate::sources::load_overrides;

#[derive(Parser)]
#[command(name = "filter-combiner")]
#[command(about = "Combine adblock and hosts filter lists into one deduplicated list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every listed source and write the combined list
    Combine {
        /// File with one source URL per line
        #[arg(short, long)]
        sources: Option<PathBuf>,

        /// Combined output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Per-request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// User-Agent header sent with each request
        #[arg(long)]
        user_agent: Option<String>,

        /// Rule placed ahead of all fetched rules (repeatable)
        #[arg(long = "override", value_name = "RULE")]
        overrides: Vec<String>,

        /// File of override rules, one per line
        #[arg(long)]
        overrides_file: Option<PathBuf>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the normalized, deduplicated rules of local files (stdin if none)
    Normalize {
        /// Input filter list files
        input: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Combine { verbose: true, .. });
    Builder::from_env(Env::default().default_filter_or(if verbose { "debug" } else { "info" }))
        .target(Target::Stderr)
        .init();

    let result = match cli.command {
        Commands::Combine {
            sources,
            output,
            timeout,
            user_agent,
            overrides,
            overrides_file,
            config,
            verbose: _,
        } => {
            let cli_layer = ConfigLayer {
                source_list_path: sources,
                output_path: output,
                timeout_secs: timeout,
                user_agent,
                header_lines: None,
                overrides,
            };
            cmd_combine(config, cli_layer, overrides_file)
        }
        Commands::Normalize { input } => cmd_normalize(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_combine(
    config_path: Option<PathBuf>,
    cli_layer: ConfigLayer,
    overrides_file: Option<PathBuf>,
) -> Result<(), CombineError> {
    let mut config = Config::default();
    if let Some(path) = config_path {
        config = config.merge(ConfigLayer::from_file(&path)?);
    }
    config = config.merge(cli_layer);
    if let Some(path) = overrides_file {
        config.overrides.extend(load_overrides(&path)?);
    }

    let fetcher = HttpFetcher::new(&config.user_agent, Duration::from_secs(config.timeout_secs))?;
    let generated_at = OffsetDateTime::now_utc().format(&Rfc3339)?;

    let summary = run_combine(&config, &fetcher, &generated_at)?;
    if summary.empty_sources > 0 {
        warn!(
            "{} of {} sources contributed no rules",
            summary.empty_sources, summary.sources
        );
    }
    debug!(
        "{} lines written: {} rules kept, {} duplicates dropped, {} lines discarded",
        summary.lines_written,
        summary.totals.emitted,
        summary.totals.duplicates,
        summary.totals.discarded
    );

    Ok(())
}

fn cmd_normalize(inputs: &[PathBuf]) -> Result<(), CombineError> {
    let mut texts = Vec::with_capacity(inputs.len().max(1));
    if inputs.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CombineError::Input {
                path: PathBuf::from("-"),
                source,
            })?;
        texts.push(text);
    }
    for path in inputs {
        let bytes = fs::read(path).map_err(|source| CombineError::Input {
            path: path.clone(),
            source,
        })?;
        texts.push(decode_body(&bytes));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_normalized(&texts, &mut out).map_err(|source| CombineError::Output {
        path: PathBuf::from("-"),
        source,
    })?;

    Ok(())
}

/// Writes each surviving rule of `texts` once, in first-seen order. Returns the
/// number of rules written.
fn write_normalized<W: Write>(texts: &[String], out: &mut W) -> io::Result<usize> {
    let mut dedup = Deduplicator::new();
    let mut written = 0usize;
    for text in texts {
        for rule in split_lines(text).filter_map(normalize_line) {
            if dedup.insert(&rule) {
                writeln!(out, "{}", rule)?;
                written += 1;
            }
        }
    }
    Ok(written)
}
