use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::error::{Result, SiteError};

lazy_static! {
    /// `name=source#target`, name and target optional
    static ref ENDPOINT: Regex =
        Regex::new(r"^(?:([\w\-]|(?:[\w\.\-]+[\w\-])?)=)?([^\|#]+?)(?:#(.*))?$").unwrap();
    static ref SOURCE_LIKE: Regex = Regex::new(r"[/\\@]").unwrap();
}

/// Target meaning "any version"
pub const WILDCARD_TARGET: &str = "*";

/// A bower endpoint decomposed into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Local package name
    pub name: String,
    /// Registry name, `owner/repo` shorthand, or URL
    pub source: String,
    /// Version range, tag, branch or commit; `*` for any
    pub target: String,
}

impl Endpoint {
    /// Decompose a `name=source#target` endpoint string
    pub fn decompose(endpoint: &str) -> Result<Self> {
        let caps = ENDPOINT
            .captures(endpoint)
            .ok_or_else(|| SiteError::Manifest(format!("Invalid endpoint: {}", endpoint)))?;

        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).trim().to_string();
        let target = group(3);

        Ok(Self {
            name: group(1),
            source: group(2),
            target: if is_wildcard(&target) {
                WILDCARD_TARGET.to_string()
            } else {
                target
            },
        })
    }

    /// Decompose a manifest entry (`"name": "value"`).
    ///
    /// A value with `#` carries its own source (the key when nothing precedes
    /// the `#`); a value that looks like a
    /// source (contains `/`, `\` or `@`) is taken whole with any target;
    /// anything else is a target for the registry package named by the key.
    pub fn from_json(key: &str, value: &str) -> Result<Self> {
        let key = key.trim();
        let value = value.trim();

        if key.is_empty() {
            return Err(SiteError::Manifest("The key must be specified".to_string()));
        }

        let endpoint = match value.split_once('#') {
            Some((source, rest)) => {
                let target = rest.split('#').next().unwrap_or("").trim();
                let target = if target.is_empty() { WILDCARD_TARGET } else { target };
                let source = source.trim();
                let source = if source.is_empty() { key } else { source };
                format!("{}={}#{}", key, source, target)
            }
            None if SOURCE_LIKE.is_match(value) => format!("{}={}#{}", key, value, WILDCARD_TARGET),
            None => format!("{}={}#{}", key, key, value),
        };

        Self::decompose(&endpoint)
    }

    pub fn is_wildcard(&self) -> bool {
        self.target == WILDCARD_TARGET
    }

    /// Installable form: `source`, or `source#target` for pinned targets
    pub fn install_spec(&self) -> String {
        if self.is_wildcard() {
            self.source.clone()
        } else {
            format!("{}#{}", self.source, self.target)
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}#{}", self.name, self.source, self.target)
    }
}

fn is_wildcard(target: &str) -> bool {
    target.is_empty() || target == WILDCARD_TARGET || target == "latest"
}
