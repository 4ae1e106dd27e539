// Reads bower manifests into install endpoints

use std::collections::BTreeMap;
use std::path::Path;

use crate::models::manifest::BowerManifest;
use crate::utils::error::{Result, SiteError};
use crate::utils_ext::fs_utils::try_read;

/// Package name to install endpoint for every dependency (including dev)
/// declared in the manifest at `bower_path`.
///
/// A missing or empty manifest declares nothing.
pub async fn get_bower_deps(bower_path: &Path) -> Result<BTreeMap<String, String>> {
    let content = try_read(bower_path).await?;
    let manifest = BowerManifest::from_json(&content).map_err(|e| match e {
        SiteError::Manifest(msg) => SiteError::Manifest(format!("{}: {}", bower_path.display(), msg)),
        other => other,
    })?;

    let endpoints = manifest.install_endpoints()?;
    log::debug!(
        "{} declares {} dependencies",
        bower_path.display(),
        endpoints.len()
    );

    Ok(endpoints)
}
