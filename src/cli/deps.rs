// Manifest and demo dependency commands

use std::path::PathBuf;

use clap::Args;

use crate::cli::print_json;
use crate::services::demo_analyzer::extract_deps;
use crate::services::manifest_reader::get_bower_deps;
use crate::utils::config::SiteConfig;
use crate::utils::error::Result;
use crate::utils_ext::paths::fix_msys;

#[derive(Debug, Args)]
pub struct ManifestCommand {
    /// bower.json to read (defaults to the configured manifest)
    pub manifest: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ManifestCommand {
    pub async fn run(&self, config: &SiteConfig) -> Result<()> {
        let path = manifest_path(self.manifest.as_deref(), config);
        let deps = get_bower_deps(&path).await?;

        if self.json {
            return print_json(&deps);
        }

        if deps.is_empty() {
            println!("No dependencies declared in {}", path.display());
        }
        for (name, endpoint) in &deps {
            println!("{} => {}", name, endpoint);
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct DepsCommand {
    /// Demo page to analyze
    pub demo: String,
    /// Install endpoint of the demoed package
    #[arg(long)]
    pub install: String,
    /// bower.json of the demoed package (defaults to the configured manifest)
    #[arg(long)]
    pub manifest: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl DepsCommand {
    pub async fn run(&self, config: &SiteConfig) -> Result<()> {
        let manifest = manifest_path(self.manifest.as_deref(), config);
        let demo = PathBuf::from(fix_msys(&self.demo));

        let deps = extract_deps(&manifest, &demo, &self.install).await?;

        if self.json {
            return print_json(&deps);
        }

        for dep in &deps {
            println!(
                "{:<7}{}  {}",
                dep.kind,
                dep.relative_path,
                dep.install_endpoint.as_deref().unwrap_or("<unresolved>")
            );
        }
        Ok(())
    }
}

fn manifest_path(arg: Option<&str>, config: &SiteConfig) -> PathBuf {
    arg.map(|p| PathBuf::from(fix_msys(p)))
        .unwrap_or_else(|| config.manifest.clone())
}
