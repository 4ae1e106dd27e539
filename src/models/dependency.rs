use serde::{Deserialize, Serialize};
use std::fmt;

/// How a demo page references a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// `<link rel="import">` document
    Link,
    /// `<script src>` reference
    Script,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Link => f.pad("link"),
            DependencyKind::Script => f.pad("script"),
        }
    }
}

/// A file a demo page needs, with the endpoint that installs its package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Path below the components directory, `/`-separated, package first
    #[serde(rename = "relPath")]
    pub relative_path: String,
    /// Install endpoint; `None` when the package is not declared in the manifest
    #[serde(rename = "install")]
    pub install_endpoint: Option<String>,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

impl DependencyRecord {
    pub fn new(relative_path: String, install_endpoint: Option<String>, kind: DependencyKind) -> Self {
        Self {
            relative_path,
            install_endpoint,
            kind,
        }
    }

    /// Package owning the file (first path segment)
    pub fn package(&self) -> &str {
        self.relative_path.split('/').next().unwrap_or_default()
    }

    pub fn is_resolved(&self) -> bool {
        self.install_endpoint.is_some()
    }
}
