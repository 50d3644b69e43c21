use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CombineError;

pub const DEFAULT_SOURCE_LIST: &str = "sources.txt";
pub const DEFAULT_OUTPUT: &str = "combined-filters.txt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "FilterCombiner/1.0";

/// Settings for one combine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source_list_path: PathBuf,
    pub output_path: PathBuf,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Descriptive header lines after the generation marker. `None` means the
    /// defaults derived from the source list name.
    pub header_lines: Option<Vec<String>>,
    pub overrides: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_list_path: PathBuf::from(DEFAULT_SOURCE_LIST),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            header_lines: None,
            overrides: Vec::new(),
        }
    }
}

/// One partial layer of settings: a JSON config file or the command line.
/// Absent fields leave the value underneath untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub source_list_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub header_lines: Option<Vec<String>>,
    pub overrides: Vec<String>,
}

impl ConfigLayer {
    pub fn from_file(path: &Path) -> Result<Self, CombineError> {
        let text = fs::read_to_string(path).map_err(|source| CombineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CombineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Config {
    /// Applies a layer on top of the current values. Overrides accumulate;
    /// everything else is replaced when present.
    pub fn merge(mut self, layer: ConfigLayer) -> Self {
        if let Some(path) = layer.source_list_path {
            self.source_list_path = path;
        }
        if let Some(path) = layer.output_path {
            self.output_path = path;
        }
        if let Some(secs) = layer.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(ua) = layer.user_agent {
            self.user_agent = ua;
        }
        if layer.header_lines.is_some() {
            self.header_lines = layer.header_lines;
        }
        self.overrides.extend(layer.overrides);
        self
    }

    pub fn header_lines(&self) -> Vec<String> {
        match &self.header_lines {
            Some(lines) => lines.clone(),
            None => default_header_lines(&self.source_list_path),
        }
    }
}

pub fn default_header_lines(source_list: &Path) -> Vec<String> {
    let name = source_list
        .file_name()
        .unwrap_or(source_list.as_os_str())
        .to_string_lossy();
    vec![
        format!("! Sources listed in {}", name),
        "! Normalization: lowercased, collapsed whitespace, hosts -> ||domain^ conversion where applicable"
            .to_string(),
        "! --- custom rules below ---".to_string(),
    ]
}
