use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::endpoint::Endpoint;
use crate::utils::error::Result;

/// The dependency sections of a `bower.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowerManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies", deserialize_with = "null_as_empty")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl BowerManifest {
    /// Parse manifest JSON; blank content is an empty manifest
    pub fn from_json(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(content)?)
    }

    /// `dependencies` overlaid with `devDependencies`
    pub fn merged_dependencies(&self) -> BTreeMap<String, String> {
        let mut merged = self.dependencies.clone();
        merged.extend(self.dev_dependencies.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Package name to install endpoint for every declared dependency
    pub fn install_endpoints(&self) -> Result<BTreeMap<String, String>> {
        let mut endpoints = BTreeMap::new();
        for (key, value) in self.merged_dependencies() {
            let endpoint = Endpoint::from_json(&key, &value)?;
            endpoints.insert(endpoint.name.clone(), endpoint.install_spec());
        }
        Ok(endpoints)
    }
}

/// `null` sections declare nothing
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
