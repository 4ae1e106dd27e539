use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::print_json;
use crate::services::components_reset::{reset_components_dir, Removal};
use crate::utils::config::SiteConfig;
use crate::utils::error::Result;
use crate::utils_ext::paths::fix_msys;

#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Components directory (defaults to the configured components_dir)
    #[arg(long)]
    pub dir: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub dir: PathBuf,
    pub removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub restored: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

impl ResetCommand {
    pub async fn run(&self, config: &SiteConfig) -> Result<()> {
        let dir = self
            .dir
            .as_deref()
            .map(|d| PathBuf::from(fix_msys(d)))
            .unwrap_or_else(|| config.components_dir.clone());

        let logger = |message: &str| log::warn!("{}", message);
        let outcome = reset_components_dir(&dir, config.preserve.as_slice(), &logger).await?;

        let reason = match &outcome.removal {
            Removal::Removed => None,
            Removal::Skipped { reason } => Some(reason.clone()),
        };
        let response = ResetResponse {
            dir,
            removed: reason.is_none(),
            reason,
            restored: outcome.restored,
            missing: outcome.missing,
        };

        if self.json {
            return print_json(&response);
        }

        match &response.reason {
            None => println!("Removed {}", response.dir.display()),
            Some(reason) => println!("Left {} in place: {}", response.dir.display(), reason),
        }
        for path in &response.restored {
            println!("  kept {}", path.display());
        }
        for path in &response.missing {
            println!("  not found {}", path.display());
        }
        Ok(())
    }
}
