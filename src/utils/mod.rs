//! Shared helpers.

pub mod paths;

pub use paths::expand_path;

/// Split a comma-separated string into trimmed segments, discarding empty ones.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}
