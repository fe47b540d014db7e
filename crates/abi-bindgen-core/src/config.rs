//! Configuration object handed to the binding generator.

use crate::artifact::{ArtifactCollector, ContractArtifact};
use crate::error::Result;
use crate::settings::BuildSettings;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Generator plugins that read raw artifacts themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PluginConfig {
    /// Reads Foundry-style artifacts from the given directory.
    Foundry { artifacts: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindgenConfig {
    /// Module the generator writes.
    pub out: PathBuf,
    pub contracts: Vec<ContractArtifact>,
    pub plugins: Vec<PluginConfig>,
}

impl BindgenConfig {
    /// Collect artifacts from disk and assemble the configuration.
    pub fn build(settings: &BuildSettings) -> Result<Self> {
        let contracts = ArtifactCollector::new(settings.clone()).collect_from_disk()?;
        Ok(Self::from_artifacts(settings, contracts))
    }

    pub fn from_artifacts(settings: &BuildSettings, contracts: Vec<ContractArtifact>) -> Self {
        Self {
            out: settings.out.clone(),
            contracts,
            plugins: vec![PluginConfig::Foundry {
                artifacts: settings.artifacts_dir.clone(),
            }],
        }
    }

    pub fn contract_names(&self) -> Vec<&str> {
        self.contracts.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&ContractArtifact> {
        self.contracts.iter().find(|c| c.name == name)
    }

    /// SHA-256 over the contracts sorted by name, so listing order does not
    /// change it.
    pub fn fingerprint(&self) -> String {
        let mut contracts: Vec<&ContractArtifact> = self.contracts.iter().collect();
        contracts.sort_by(|a, b| a.name.cmp(&b.name));

        let mut hasher = Sha256::new();
        for contract in contracts {
            hasher.update(contract.name.as_bytes());
            hasher.update([0u8]);
            hasher.update(canonical(&contract.abi).to_string().as_bytes());
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Copy of `value` with every object's keys in sorted order, so the
/// serialised form does not depend on how the map keeps its keys.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonical(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}
