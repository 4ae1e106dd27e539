// File system utilities

use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;
use glob::{MatchOptions, Pattern};

use crate::utils::error::{Result, SiteError};
use crate::utils_ext::paths::absolute;

pub fn ensure_directory_exists(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Read a file, treating a missing file as empty
pub async fn try_read(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(SiteError::io_at(path, e)),
    }
}

/// Expand glob patterns relative to `cwd`.
///
/// Patterns prefixed with `!` remove matches of the remaining patterns.
/// Returned paths are relative to `cwd`, in match order, without duplicates.
pub fn resolve_patterns<S: AsRef<str>>(cwd: &Path, patterns: &[S], files_only: bool) -> Result<Vec<PathBuf>> {
    let (negated, positive): (Vec<&str>, Vec<&str>) = patterns
        .iter()
        .map(AsRef::as_ref)
        .partition(|p| p.starts_with('!'));

    let excludes = negated
        .iter()
        .map(|p| Pattern::new(&p[1..]))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let match_options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let exclude_options = MatchOptions {
        require_literal_separator: true,
        ..match_options
    };

    let base = Pattern::escape(&cwd.to_string_lossy());
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for pattern in positive {
        let full = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            format!("{}/{}", base, pattern)
        };

        for entry in glob::glob_with(&full, match_options)? {
            let path = entry.map_err(|e| SiteError::Pattern(e.to_string()))?;
            if files_only && !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(cwd).map(Path::to_path_buf).unwrap_or(path);
            if excludes.iter().any(|ex| ex.matches_path_with(&relative, exclude_options)) {
                continue;
            }

            if seen.insert(relative.clone()) {
                matches.push(relative);
            }
        }
    }

    Ok(matches)
}

/// File name up to its first `.`
pub fn base_name(path: &Path) -> String {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    match name.find('.') {
        Some(dot) => name[..dot].to_string(),
        None => name.into_owned(),
    }
}

/// Merge two pattern sets resolved against the working directory.
/// See [`merge_patterns_in`].
pub fn merge_patterns<S: AsRef<str>>(default_patterns: &[S], patterns: &[S]) -> Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir()?;
    merge_patterns_in(&cwd, default_patterns, patterns)
}

/// Merge two pattern sets where `patterns` has priority over `default_patterns`.
///
/// Matches are keyed by [`base_name`]; one path is kept per base name and an
/// override match replaces a default match. Output is ordered by base name.
pub fn merge_patterns_in<S: AsRef<str>>(
    cwd: &Path,
    default_patterns: &[S],
    patterns: &[S],
) -> Result<Vec<PathBuf>> {
    let default_paths = resolve_patterns(cwd, default_patterns, false)?;
    let paths = resolve_patterns(cwd, patterns, false)?;

    let mut merged = BTreeMap::new();
    for path in default_paths.into_iter().chain(paths) {
        merged.insert(base_name(&path), path);
    }

    Ok(merged.into_values().collect())
}

/// Copy files matching `patterns` from `from_dir` to `to_dir`, keeping their
/// relative layout and creating intermediate directories.
///
/// Returns the absolute destination paths. Any failed copy fails the call.
pub async fn copy_patterns<S: AsRef<str>>(patterns: &[S], from_dir: &Path, to_dir: &Path) -> Result<Vec<PathBuf>> {
    let from_dir = absolute(from_dir)?;
    let to_dir = absolute(to_dir)?;

    let matches = resolve_patterns(&from_dir, patterns, true)?;
    let sources: Vec<PathBuf> = matches.iter().map(|p| from_dir.join(p)).collect();
    let targets: Vec<PathBuf> = matches.iter().map(|p| to_dir.join(p)).collect();

    log::debug!(
        "Copying {} files from {} to {}",
        targets.len(),
        from_dir.display(),
        to_dir.display()
    );

    try_join_all(targets.iter().filter_map(|t| t.parent()).map(|dir| async move {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| SiteError::io_at(dir, e))
    }))
    .await?;

    try_join_all(sources.iter().zip(&targets).map(|(from, to)| async move {
        tokio::fs::copy(from, to)
            .await
            .map(|_| ())
            .map_err(|e| SiteError::io_at(from, e))
    }))
    .await?;

    Ok(targets)
}
