use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use crate::cli::print_json;
use crate::services::archive_fetcher::ArchiveFetcher;
use crate::utils::config::SiteConfig;
use crate::utils::error::Result;
use crate::utils_ext::paths::fix_msys;

#[derive(Debug, Args)]
pub struct FetchCommand {
    /// Repository as <owner>/<repo>
    pub repo: String,
    /// Directory to unpack into
    pub dir: String,
    /// Name of the unpacked directory
    pub name: String,
    /// Archive host (overrides archive_host from the configuration)
    #[arg(long, env = "SITEKIT_ARCHIVE_HOST")]
    pub host: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl FetchCommand {
    pub async fn run(&self, config: &SiteConfig) -> Result<()> {
        let host = self.host.clone().unwrap_or_else(|| config.archive_host.clone());
        let fetcher = ArchiveFetcher::with_host(host);
        let dir = PathBuf::from(fix_msys(&self.dir));

        let path = fetcher.extract_repo(&self.repo, &dir, &self.name).await?;

        if self.json {
            print_json(&json!({ "repo": self.repo, "path": path }))
        } else {
            println!("Extracted {} to {}", self.repo, path.display());
            Ok(())
        }
    }
}
