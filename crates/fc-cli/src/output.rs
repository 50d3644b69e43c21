use std::fs;
use std::io::{self, Write};
use std::path::Path;

use fc_compiler::OutputDocument;
use tempfile::NamedTempFile;

use crate::error::CombineError;

/// Replaces `path` with the document text.
///
/// The text goes to a temporary file in the same directory which is then
/// renamed over the target, so a failed write leaves any previous output as it
/// was.
pub fn write_output(path: &Path, doc: &OutputDocument) -> Result<(), CombineError> {
    let output_err = |source: io::Error| CombineError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(output_err)?;
    tmp.write_all(doc.to_text().as_bytes()).map_err(output_err)?;
    tmp.as_file().sync_all().map_err(output_err)?;

    // Temp files are created owner-only; keep the target's mode, or use the
    // usual 0644 for a new file.
    let permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(permissions) = permissions {
        fs::set_permissions(tmp.path(), permissions).map_err(output_err)?;
    }

    tmp.persist(path).map_err(|e| output_err(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
