// sitekit - documentation site build helpers
// Main CLI entry point

use clap::Parser;
use sitekit::cli::{Cli, CliDispatcher};
use sitekit::utils::error::UserError;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = CliDispatcher::execute(cli).await;

    if let Err(err) = result {
        let user_error = UserError::from_site_error(&err);
        user_error.print();
        process::exit(user_error.exit_code);
    }
}
