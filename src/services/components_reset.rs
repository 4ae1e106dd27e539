// Wipes the installed components directory while keeping a few files

use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;

use crate::utils::error::{Result, SiteError};
use crate::utils_ext::paths::absolute;

/// Directory the components are installed into, below the site root
pub const COMPONENTS_DIR_NAME: &str = "bower_components";

/// Files below the components directory that pages load directly and that
/// must survive a reset. Pages referencing them (particles.html among
/// others) need updating when this list changes.
pub const PRESERVED_COMPONENT_FILES: &[&str] = &[
    "iframe-resizer/js/iframeResizer.contentWindow.min.js",
    "webcomponentsjs/webcomponents-lite.js",
    "particles.js/particles.js",
    "t-component-panel/demo/property.json",
    "t-component-panel/ace-element/ace/ace.js",
    "t-component-panel/ace-element/ace/mode-json.js",
    "t-component-panel/ace-element/ace/mode-javascript.js",
    "t-component-panel/ace-element/ace/worker-json.js",
    "t-component-panel/ace-element/ace/worker-javascript.js",
];

/// What happened to the directory itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// Removal failed; the directory may still hold other files
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    pub removal: Removal,
    /// Preserved files put back in place
    pub restored: Vec<PathBuf>,
    /// Preserved files that did not exist before the reset
    pub missing: Vec<PathBuf>,
}

impl ResetOutcome {
    pub fn was_removed(&self) -> bool {
        self.removal == Removal::Removed
    }
}

/// Reset `<site_dir>/bower_components`, keeping [`PRESERVED_COMPONENT_FILES`]
pub async fn remove_bower_components(site_dir: &Path, logger: &(dyn Fn(&str) + Sync)) -> Result<ResetOutcome> {
    reset_components_dir(&site_dir.join(COMPONENTS_DIR_NAME), PRESERVED_COMPONENT_FILES, logger).await
}

/// Remove `dir` recursively except for the `preserved` files (relative to `dir`).
///
/// Preserved files are staged in a temporary sibling directory, `dir` is
/// removed, and the files are moved back with their parent directories
/// recreated. A failed removal is reported to `logger` and in the outcome;
/// every other failure is returned.
pub async fn reset_components_dir<S: AsRef<str>>(
    dir: &Path,
    preserved: &[S],
    logger: &(dyn Fn(&str) + Sync),
) -> Result<ResetOutcome> {
    let dir = absolute(dir)?;
    let parent = dir
        .parent()
        .ok_or_else(|| SiteError::InvalidInput(format!("{} has no parent directory", dir.display())))?;

    let (present, missing): (Vec<PathBuf>, Vec<PathBuf>) = preserved
        .iter()
        .map(|p| PathBuf::from(p.as_ref()))
        .partition(|rel| dir.join(rel).is_file());
    for rel in &missing {
        log::warn!("Preserved file {} does not exist", dir.join(rel).display());
    }

    let staging = tempfile::Builder::new()
        .prefix(".preserve-")
        .tempdir_in(parent)
        .map_err(|e| SiteError::io_at(parent, e))?;
    let staged = |rel: &Path| staging.path().join(rel);

    try_join_all(present.iter().map(|rel| {
        let (from, to) = (dir.join(rel), staged(rel.as_path()));
        async move {
            create_parent(&to).await?;
            tokio::fs::copy(&from, &to)
                .await
                .map(|_| ())
                .map_err(|e| SiteError::io_at(&from, e))
        }
    }))
    .await?;

    let removal = match tokio::fs::remove_dir_all(&dir).await {
        Ok(()) => Removal::Removed,
        Err(e) => {
            let reason = SiteError::io_at(&dir, e).to_string();
            logger(&reason);
            Removal::Skipped { reason }
        }
    };

    let restored: Vec<PathBuf> = present.iter().map(|rel| dir.join(rel)).collect();
    try_join_all(restored.iter().map(|path| create_parent(path))).await?;
    try_join_all(present.iter().zip(&restored).map(|(rel, to)| {
        let from = staged(rel.as_path());
        async move {
            tokio::fs::rename(&from, to)
                .await
                .map_err(|e| SiteError::io_at(&from, e))
        }
    }))
    .await?;

    log::debug!(
        "Reset {}: {} preserved, {} missing",
        dir.display(),
        restored.len(),
        missing.len()
    );

    Ok(ResetOutcome {
        removal,
        restored,
        missing: missing.iter().map(|rel| dir.join(rel)).collect(),
    })
}

async fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) => tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| SiteError::io_at(dir, e)),
        None => Ok(()),
    }
}
