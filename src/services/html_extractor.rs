// Inner markup extraction from HTML files

use std::path::Path;

use scraper::{Html, Selector};

use crate::utils::error::{Result, SiteError};

/// Stands in for CRLF while parsing, since the HTML parser folds CRLF into LF
/// and the normalization below must only break lines at CRLF.
const CRLF_MARK: &str = "\u{E000}";

/// Normalized inner HTML of the first element of `path` matching `tag`
pub async fn extract_inner_html(tag: &str, path: &Path) -> Result<String> {
    let markup = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SiteError::io_at(path, e))?;

    inner_html_of(tag, &markup)
}

/// Normalized inner HTML of the first element of `markup` matching `tag`.
///
/// The inner HTML is split on CRLF, each line trimmed, empty lines dropped
/// and the rest joined without a separator. Empty when nothing matches.
pub fn inner_html_of(tag: &str, markup: &str) -> Result<String> {
    let selector = Selector::parse(tag)
        .map_err(|e| SiteError::InvalidInput(format!("Invalid selector '{}': {:?}", tag, e)))?;

    let document = Html::parse_document(&markup.replace("\r\n", CRLF_MARK));
    let inner = document
        .select(&selector)
        .next()
        .map(|element| element.inner_html())
        .unwrap_or_default();

    Ok(inner
        .split(CRLF_MARK)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect())
}
