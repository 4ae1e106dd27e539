// Copy and merge commands over glob patterns

use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::json;

use crate::cli::print_json;
use crate::utils::error::Result;
use crate::utils_ext::fs_utils::{copy_patterns, merge_patterns};
use crate::utils_ext::paths::fix_msys;

#[derive(Debug, Args)]
pub struct CopyCommand {
    /// Directory the patterns are matched in
    pub from: String,
    /// Destination directory
    pub to: String,
    /// Glob patterns; prefix with '!' to exclude
    #[arg(required = true)]
    pub patterns: Vec<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CopyCommand {
    pub async fn run(&self) -> Result<()> {
        let from = PathBuf::from(fix_msys(&self.from));
        let to = PathBuf::from(fix_msys(&self.to));

        let copied = copy_patterns(&self.patterns, &from, &to).await?;

        if self.json {
            print_json(&json!({ "copied": copied }))
        } else {
            print_paths(&copied);
            println!("Copied {} files to {}", copied.len(), to.display());
            Ok(())
        }
    }
}

#[derive(Debug, Args)]
pub struct MergeCommand {
    /// Default patterns
    #[arg(long = "default", required = true, num_args = 1..)]
    pub defaults: Vec<String>,
    /// Patterns whose matches replace defaults with the same base name
    #[arg(long = "override", num_args = 1..)]
    pub overrides: Vec<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl MergeCommand {
    pub fn run(&self) -> Result<()> {
        let merged = merge_patterns(&self.defaults, &self.overrides)?;

        if self.json {
            print_json(&json!({ "paths": merged }))
        } else {
            print_paths(&merged);
            Ok(())
        }
    }
}

fn print_paths(paths: &[PathBuf]) {
    for path in paths.iter().map(PathBuf::as_path).map(Path::display) {
        println!("{}", path);
    }
}
