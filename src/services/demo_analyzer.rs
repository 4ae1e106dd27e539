// Resolves the static dependencies of component demo pages

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::models::dependency::{DependencyKind, DependencyRecord};
use crate::services::manifest_reader::get_bower_deps;
use crate::utils::error::{Result, SiteError};
use crate::utils_ext::paths::{absolute, normalize_lexically};

/// Documents and scripts statically reachable from an entry page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportGraph {
    /// Imported documents, including the entry page itself
    pub documents: BTreeSet<PathBuf>,
    /// Scripts referenced by any of the documents
    pub scripts: BTreeSet<PathBuf>,
}

/// Static analysis of an HTML entry page
#[async_trait]
pub trait ImportAnalyzer: Send + Sync {
    async fn analyze(&self, entry: &Path) -> Result<ImportGraph>;
}

/// Follows `<link rel="import">` recursively and collects `<script src>`.
///
/// Remote and root-relative references are ignored. Imports that do not
/// exist on disk are recorded but not followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlImportAnalyzer;

#[async_trait]
impl ImportAnalyzer for HtmlImportAnalyzer {
    async fn analyze(&self, entry: &Path) -> Result<ImportGraph> {
        let entry = normalize_lexically(entry);
        let mut graph = ImportGraph::default();
        let mut queue = VecDeque::from([entry.clone()]);
        graph.documents.insert(entry.clone());

        while let Some(document) = queue.pop_front() {
            let markup = match tokio::fs::read_to_string(&document).await {
                Ok(markup) => markup,
                Err(e) if e.kind() == ErrorKind::NotFound && document != entry => {
                    log::warn!("Imported document {} does not exist", document.display());
                    continue;
                }
                Err(e) => return Err(SiteError::io_at(&document, e)),
            };

            let (imports, scripts) = references(&markup)?;
            let dir = document.parent().unwrap_or_else(|| Path::new(""));

            for href in imports.iter().filter_map(|h| local_reference(h)) {
                let path = normalize_lexically(&dir.join(href));
                if graph.documents.insert(path.clone()) {
                    queue.push_back(path);
                }
            }

            for src in scripts.iter().filter_map(|s| local_reference(s)) {
                graph.scripts.insert(normalize_lexically(&dir.join(src)));
            }
        }

        log::debug!(
            "{}: {} documents, {} scripts",
            entry.display(),
            graph.documents.len(),
            graph.scripts.len()
        );

        Ok(graph)
    }
}

/// Import hrefs and script srcs of one document
fn references(markup: &str) -> Result<(Vec<String>, Vec<String>)> {
    let imports = selector(r#"link[rel~="import"][href]"#)?;
    let scripts = selector("script[src]")?;
    let document = Html::parse_document(markup);

    let hrefs = document
        .select(&imports)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .collect();
    let srcs = document
        .select(&scripts)
        .filter_map(|el| el.value().attr("src"))
        .map(str::to_string)
        .collect();

    Ok((hrefs, srcs))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SiteError::InvalidInput(format!("Invalid selector '{}': {:?}", css, e)))
}

/// Filesystem-relative part of a reference, without query or fragment
fn local_reference(reference: &str) -> Option<&str> {
    let reference = reference.trim();
    if reference.is_empty()
        || reference.contains("://")
        || reference.starts_with("//")
        || reference.starts_with('/')
        || reference.starts_with("data:")
    {
        return None;
    }

    let end = reference.find(['?', '#']).unwrap_or(reference.len());
    let path = &reference[..end];
    (!path.is_empty()).then_some(path)
}

/// Maps referenced files to the package that provides them
pub struct PackageLocator<'a> {
    /// Directory name of the demoed package
    element_name: String,
    /// Directory the packages are installed into, usually `bower_components`
    parent_dir: String,
    element_install: &'a str,
    bower_deps: &'a BTreeMap<String, String>,
}

impl<'a> PackageLocator<'a> {
    pub fn new(bower_path: &Path, element_install: &'a str, bower_deps: &'a BTreeMap<String, String>) -> Result<Self> {
        let base_dir = absolute(bower_path)?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let name_of = |p: Option<&Path>| {
            p.and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        Ok(Self {
            element_name: name_of(Some(base_dir.as_path())),
            parent_dir: name_of(base_dir.parent()),
            element_install,
            bower_deps,
        })
    }

    /// Describe `path` relative to the components directory.
    ///
    /// Files of the demoed package install with its own endpoint; others are
    /// looked up in the manifest and stay unresolved when not declared.
    pub fn to_dep(&self, kind: DependencyKind, path: &Path) -> DependencyRecord {
        let segments: Vec<String> = normalize_lexically(path)
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let start = segments
            .iter()
            .position(|s| *s == self.parent_dir)
            .map_or(0, |i| i + 1);
        let segments = &segments[start..];
        let package = segments.first().map(String::as_str).unwrap_or_default();

        let install = if package == self.element_name {
            Some(self.element_install.to_string())
        } else {
            let endpoint = self.bower_deps.get(package).cloned();
            if endpoint.is_none() {
                log::warn!("Package '{}' is not declared in the manifest", package);
            }
            endpoint
        };

        DependencyRecord::new(segments.join("/"), install, kind)
    }
}

/// Dependencies of the demo page at `demo_path`, scripts first, then imports.
/// See [`extract_deps_with`].
pub async fn extract_deps(bower_path: &Path, demo_path: &Path, element_install: &str) -> Result<Vec<DependencyRecord>> {
    extract_deps_with(&HtmlImportAnalyzer, bower_path, demo_path, element_install).await
}

/// Dependencies of the demo page at `demo_path` using `analyzer`.
///
/// `bower_path` is the demoed package's manifest; `element_install` is the
/// endpoint that installs the demoed package itself. The demo page is not
/// listed as its own dependency.
pub async fn extract_deps_with<A: ImportAnalyzer + ?Sized>(
    analyzer: &A,
    bower_path: &Path,
    demo_path: &Path,
    element_install: &str,
) -> Result<Vec<DependencyRecord>> {
    let (graph, bower_deps) = tokio::try_join!(analyzer.analyze(demo_path), get_bower_deps(bower_path))?;
    let locator = PackageLocator::new(bower_path, element_install, &bower_deps)?;
    let demo = absolute(demo_path)?;

    let mut deps = Vec::with_capacity(graph.scripts.len() + graph.documents.len());
    for path in &graph.scripts {
        deps.push(locator.to_dep(DependencyKind::Script, &absolute(path)?));
    }

    for path in &graph.documents {
        let path = absolute(path)?;
        if path == demo {
            continue;
        }
        deps.push(locator.to_dep(DependencyKind::Link, &path));
    }

    Ok(deps)
}
