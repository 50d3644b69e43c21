use std::io;
use std::path::PathBuf;

/// Errors that end a run. Per-source fetch failures are not among them; the
/// fetcher logs those and carries on.
#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    #[error("Failed to read source list '{}': {source}", .path.display())]
    SourceList { path: PathBuf, source: io::Error },
    #[error("Failed to read config '{}': {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },
    #[error("Invalid config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to read overrides '{}': {source}", .path.display())]
    Overrides { path: PathBuf, source: io::Error },
    #[error("Failed to read input '{}': {source}", .path.display())]
    Input { path: PathBuf, source: io::Error },
    #[error("Error writing '{}': {source}", .path.display())]
    Output { path: PathBuf, source: io::Error },
    #[error("Failed to start tokio runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}
