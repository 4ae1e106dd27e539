// Install command implementation
// Hands package endpoints to bower and reports its result

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::cli::print_json;
use crate::services::bower_command::BowerCommand;
use crate::utils::config::SiteConfig;
use crate::utils::error::Result;
use crate::utils_ext::paths::fix_msys;

#[derive(Debug, Args)]
pub struct InstallCommand {
    /// Endpoints to install (if empty, bower installs from bower.json)
    pub packages: Vec<String>,
    /// Directory to run bower in
    #[arg(long)]
    pub cwd: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct InstallResponse {
    pub status: String,
    pub duration_ms: u64,
    pub packages: Vec<String>,
    pub result: Value,
}

impl InstallCommand {
    pub async fn run(&self, config: &SiteConfig) -> Result<()> {
        let start = Instant::now();
        let bower = BowerCommand::with_program(config.bower.clone());
        let cwd = self.cwd.as_deref().map(|p| PathBuf::from(fix_msys(p)));

        let result = bower.install(&self.packages, cwd.as_deref()).await?;

        let response = InstallResponse {
            status: "success".to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
            packages: self.packages.clone(),
            result,
        };

        if self.json {
            return print_json(&response);
        }

        if response.packages.is_empty() {
            println!("Installed bower.json dependencies");
        } else {
            println!("Installed {}", response.packages.join(", "));
        }
        if !response.result.is_null() {
            println!("{}", response.result);
        }
        println!("Completed in {}ms", response.duration_ms);
        Ok(())
    }
}
