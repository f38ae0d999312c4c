//! Config path expansion

use std::path::PathBuf;

/// Expand `~` and `$VAR` / `${VAR}` forms in a candidate config path.
///
/// Returns `None` when the path references an undefined variable; such a
/// candidate can never exist on disk.
pub fn expand_path(path: &str) -> Option<PathBuf> {
    match shellexpand::full(path) {
        Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
        Err(e) => {
            tracing::debug!("Skipping config path {}: {}", path, e);
            None
        }
    }
}
