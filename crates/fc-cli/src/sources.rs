use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::CombineError;

/// Reads the newline-delimited source URLs, dropping blanks, `#` comments and
/// repeated entries. The first occurrence keeps its position.
pub fn load_source_list(path: &Path) -> Result<Vec<String>, CombineError> {
    let content = fs::read_to_string(path).map_err(|source| CombineError::SourceList {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seen = HashSet::new();
    Ok(list_entries(&content)
        .filter(|url| seen.insert(*url))
        .map(str::to_string)
        .collect())
}

/// Reads operator override rules, one per line. Blank and `#` lines are skipped
/// the same way as in the source list; everything else goes to the normalizer.
pub fn load_overrides(path: &Path) -> Result<Vec<String>, CombineError> {
    let content = fs::read_to_string(path).map_err(|source| CombineError::Overrides {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(list_entries(&content).map(str::to_string).collect())
}

fn list_entries(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
