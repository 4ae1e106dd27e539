use std::path::PathBuf;

use clap::Args;

use crate::services::html_extractor::extract_inner_html;
use crate::utils::error::Result;
use crate::utils_ext::paths::fix_msys;

#[derive(Debug, Args)]
pub struct InnerHtmlCommand {
    /// Element selector, e.g. `template` or `dom-module`
    pub tag: String,
    /// HTML file to read
    pub file: String,
}

impl InnerHtmlCommand {
    pub async fn run(&self) -> Result<()> {
        let path = PathBuf::from(fix_msys(&self.file));
        let inner = extract_inner_html(&self.tag, &path).await?;
        println!("{}", inner);
        Ok(())
    }
}
