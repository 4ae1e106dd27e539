// CLI module for command-line interface

pub mod case;
pub mod deps;
pub mod fetch;
pub mod files;
pub mod html;
pub mod install;
pub mod reset;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::utils::config::{ConfigParser, DEFAULT_CONFIG_FILE};
use crate::utils::error::{Result, SiteError};

use self::case::CaseCommand;
use self::deps::{DepsCommand, ManifestCommand};
use self::fetch::FetchCommand;
use self::files::{CopyCommand, MergeCommand};
use self::html::InnerHtmlCommand;
use self::install::InstallCommand;
use self::reset::ResetCommand;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "sitekit")]
#[command(about = "Build helpers for component documentation sites")]
#[command(long_about = r#"sitekit bundles the file, archive, manifest and markup helpers used
while building a component documentation site.

Examples:
  sitekit copy src _site 'demo/**/*'          Copy matching files, keeping layout
  sitekit fetch Polymer/polymer vendor polymer  Download and unpack a repository
  sitekit deps demo/index.html --install org/t-button
                                              List the dependencies of a demo page
  sitekit reset                               Wipe bower_components, keeping pinned files

Settings are read from sitekit.toml in the working directory when present."#)]
#[command(version)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "SITEKIT_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Copy files matching glob patterns into another directory
    Copy(CopyCommand),

    /// Merge default and override glob patterns by file base name
    Merge(MergeCommand),

    /// Download a repository's master archive and unpack it
    #[command(long_about = r#"Download <owner>/<repo>'s master branch tarball, unpack it into DIR
and rename the unpacked <repo>-master directory to NAME.

Examples:
  sitekit fetch Polymer/polymer vendor polymer
  sitekit fetch org/t-button . t-button --host http://localhost:8080"#)]
    Fetch(FetchCommand),

    /// Print the install endpoints declared by a bower manifest
    Manifest(ManifestCommand),

    /// List the imports and scripts a demo page depends on
    Deps(DepsCommand),

    /// Print the normalized inner HTML of the first matching element
    InnerHtml(InnerHtmlCommand),

    /// Remove the components directory, keeping the preserved files
    Reset(ResetCommand),

    /// Install packages with bower
    Install(InstallCommand),

    /// Convert text between dash-case, camelCase and Title Case
    Case(CaseCommand),
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Execute a CLI command
    pub async fn execute(cli: Cli) -> Result<()> {
        let config = ConfigParser::load_site_config(&cli.config)?;

        match cli.command {
            Commands::Copy(cmd) => cmd.run().await,
            Commands::Merge(cmd) => cmd.run(),
            Commands::Fetch(cmd) => cmd.run(&config).await,
            Commands::Manifest(cmd) => cmd.run(&config).await,
            Commands::Deps(cmd) => cmd.run(&config).await,
            Commands::InnerHtml(cmd) => cmd.run().await,
            Commands::Reset(cmd) => cmd.run(&config).await,
            Commands::Install(cmd) => cmd.run(&config).await,
            Commands::Case(cmd) => {
                cmd.run();
                Ok(())
            }
        }
    }
}

/// Pretty-print a JSON response to stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| SiteError::Config(format!("JSON serialization error: {}", e)))?;
    println!("{}", text);
    Ok(())
}
