use crate::config::BindgenConfig;
use serde::Serialize;

/// Suffix the generator appends to a contract's deploy/attach factory.
pub const FACTORY_SUFFIX: &str = "__factory";

/// Symbols a binding package re-exports for one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub contract: String,
    pub type_name: String,
    pub factory: String,
}

/// Re-export list for every collected contract, sorted by contract name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportIndex {
    pub entries: Vec<ExportEntry>,
}

impl ExportIndex {
    pub fn from_config(config: &BindgenConfig) -> Self {
        let mut entries: Vec<ExportEntry> = config
            .contracts
            .iter()
            .map(|c| ExportEntry {
                contract: c.name.clone(),
                type_name: c.name.clone(),
                factory: format!("{}{}", c.name, FACTORY_SUFFIX),
            })
            .collect();
        entries.sort_by(|a, b| a.contract.cmp(&b.contract));
        Self { entries }
    }

    /// Every exported symbol: the types first, then the factories.
    pub fn symbols(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.type_name.as_str())
            .chain(self.entries.iter().map(|e| e.factory.as_str()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
