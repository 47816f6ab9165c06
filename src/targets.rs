use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ConfigError;

/// Resolve the hosts to query from exactly one of an explicit list or a
/// host-list file.
///
/// Entries are trimmed and blank entries dropped; order and duplicates are
/// kept. Lines in the file starting with `#` are comments.
pub fn resolve_targets(
    computer_names: &[String],
    list_path: Option<&Path>,
) -> Result<Vec<String>, ConfigError> {
    let explicit = clean(computer_names.iter().map(String::as_str));

    match (explicit.is_empty(), list_path) {
        (false, Some(_)) => Err(ConfigError::ConflictingSources),
        (true, None) => Err(ConfigError::NoSource),
        (false, None) => Ok(explicit),
        (true, Some(path)) => read_target_file(path),
    }
}

fn read_target_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let targets = clean(contents.lines().filter(|l| !l.trim_start().starts_with('#')));
    debug!(path = %path.display(), count = targets.len(), "read host list");

    if targets.is_empty() {
        return Err(ConfigError::EmptyHostList(path.to_path_buf()));
    }
    Ok(targets)
}

fn clean<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    entries
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
