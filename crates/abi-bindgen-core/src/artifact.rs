//! Turning an artifact directory into contract artifacts.

use crate::abi::AbiSummary;
use crate::error::{CollectError, Result};
use crate::settings::BuildSettings;
use crate::store::{ArtifactStore, FsArtifactStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

/// A contract name paired with its interface description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractArtifact {
    pub name: String,
    /// Copied verbatim from the artifact's interface field.
    pub abi: Value,
}

impl ContractArtifact {
    pub fn new(name: impl Into<String>, abi: Value) -> Self {
        Self {
            name: name.into(),
            abi,
        }
    }

    pub fn summary(&self) -> AbiSummary {
        AbiSummary::from_abi(&self.abi)
    }
}

/// Raw directory entry handed to [`collect_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSource {
    pub file_name: String,
    pub contents: String,
}

impl ArtifactSource {
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

/// Contract name for an artifact file, or `None` if the file does not carry
/// the artifact extension. Only the trailing suffix is removed.
pub fn contract_name<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    file_name.strip_suffix(extension)
}

/// How a regular file in the artifact directory is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind<'a> {
    /// Carries the artifact extension; holds the contract name.
    Artifact(&'a str),
    /// Hidden housekeeping file such as `.gitkeep` or `.DS_Store`.
    Hidden,
    /// Anything else. Collecting fails rather than drop it.
    Unexpected,
}

/// Classify a regular file. Hidden files are only ignored when they do not
/// carry the artifact extension.
pub fn classify<'a>(file_name: &'a str, extension: &str) -> EntryKind<'a> {
    match contract_name(file_name, extension) {
        Some(name) => EntryKind::Artifact(name),
        None if file_name.starts_with('.') => EntryKind::Hidden,
        None => EntryKind::Unexpected,
    }
}

/// Build contract artifacts from already-read directory contents.
///
/// Sources keep their order. Hidden files are ignored; a file without the
/// artifact extension, or any other problem, aborts the whole collection.
pub fn collect_artifacts<I>(sources: I, settings: &BuildSettings) -> Result<Vec<ContractArtifact>>
where
    I: IntoIterator<Item = ArtifactSource>,
{
    let mut contracts = Vec::new();
    // lowercased name -> file it came from
    let mut seen: HashMap<String, String> = HashMap::new();

    for source in sources {
        let name = match classify(&source.file_name, &settings.extension) {
            EntryKind::Artifact(name) => name,
            EntryKind::Hidden => {
                debug!(file = %source.file_name, "skipping hidden file");
                continue;
            }
            EntryKind::Unexpected => {
                return Err(CollectError::UnexpectedEntry {
                    file: source.file_name.clone(),
                    extension: settings.extension.clone(),
                });
            }
        };
        if name.is_empty() {
            return Err(CollectError::EmptyName {
                file: source.file_name.clone(),
            });
        }

        let key = name.to_ascii_lowercase();
        if let Some(first) = seen.get(&key) {
            return Err(CollectError::DuplicateContract {
                name: name.to_string(),
                first: first.clone(),
                second: source.file_name.clone(),
            });
        }

        let abi = extract_abi(&source, &settings.abi_field)?;
        debug!(contract = name, file = %source.file_name, "collected artifact");

        seen.insert(key, source.file_name.clone());
        contracts.push(ContractArtifact::new(name, abi));
    }

    Ok(contracts)
}

fn extract_abi(source: &ArtifactSource, field: &str) -> Result<Value> {
    let document: Value =
        serde_json::from_str(&source.contents).map_err(|e| CollectError::Malformed {
            file: source.file_name.clone(),
            source: e,
        })?;

    let abi = match document {
        Value::Object(mut map) => map.remove(field),
        _ => None,
    }
    .ok_or_else(|| CollectError::MissingAbi {
        file: source.file_name.clone(),
        field: field.to_string(),
    })?;

    if !abi.is_array() {
        return Err(CollectError::InvalidAbi {
            file: source.file_name.clone(),
            field: field.to_string(),
        });
    }
    Ok(abi)
}

/// Reads every artifact from a store and builds the contract list.
#[derive(Debug, Clone, Default)]
pub struct ArtifactCollector {
    settings: BuildSettings,
}

impl ArtifactCollector {
    pub fn new(settings: BuildSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Collect from the configured artifact directory on disk.
    pub fn collect_from_disk(&self) -> Result<Vec<ContractArtifact>> {
        self.collect(&FsArtifactStore::new(&self.settings.artifacts_dir))
    }

    /// Fails before listing anything when the store's directory is absent.
    pub fn collect<S: ArtifactStore + ?Sized>(&self, store: &S) -> Result<Vec<ContractArtifact>> {
        if !store.exists() {
            return Err(CollectError::MissingArtifactDir {
                path: store.location().to_path_buf(),
            });
        }

        let mut sources = Vec::new();
        for entry in store.list()? {
            if !entry.is_file {
                debug!(entry = %entry.file_name, "skipping subdirectory");
                continue;
            }
            match classify(&entry.file_name, &self.settings.extension) {
                EntryKind::Artifact(_) => {}
                EntryKind::Hidden => {
                    debug!(entry = %entry.file_name, "skipping hidden file");
                    continue;
                }
                EntryKind::Unexpected => {
                    return Err(CollectError::UnexpectedEntry {
                        file: entry.file_name,
                        extension: self.settings.extension.clone(),
                    });
                }
            }
            let contents = store.read(&entry.file_name)?;
            sources.push(ArtifactSource::new(entry.file_name, contents));
        }

        let contracts = collect_artifacts(sources, &self.settings)?;
        info!(
            count = contracts.len(),
            dir = %store.location().display(),
            "collected contract artifacts"
        );
        Ok(contracts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryArtifactStore;
    use serde_json::json;

    fn settings() -> BuildSettings {
        BuildSettings::default()
    }

    #[test]
    fn test_contract_name_strips_suffix_only() {
        assert_eq!(contract_name("TokenA.json", ".json"), Some("TokenA"));
        assert_eq!(contract_name("a.json.json", ".json"), Some("a.json"));
        assert_eq!(contract_name("README.md", ".json"), None);
    }

    #[test]
    fn test_single_artifact() {
        let abi = json!([{ "type": "function", "name": "transfer", "inputs": [] }]);
        let sources = vec![ArtifactSource::new(
            "TokenA.json",
            json!({ "abi": abi.clone(), "bytecode": "0x" }).to_string(),
        )];

        let contracts = collect_artifacts(sources, &settings()).unwrap();
        assert_eq!(contracts, vec![ContractArtifact::new("TokenA", abi)]);
    }

    #[test]
    fn test_keeps_listing_order() {
        let sources = vec![
            ArtifactSource::new("Zeta.json", r#"{"abi": []}"#),
            ArtifactSource::new("Alpha.json", r#"{"abi": []}"#),
        ];
        let names: Vec<_> = collect_artifacts(sources, &settings())
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_malformed_names_file() {
        let sources = vec![ArtifactSource::new("Broken.json", "{ not json")];
        let err = collect_artifacts(sources, &settings()).unwrap_err();
        assert!(matches!(err, CollectError::Malformed { ref file, .. } if file == "Broken.json"));
        assert!(err.to_string().contains("Broken.json"));
    }

    #[test]
    fn test_missing_abi_field() {
        let sources = vec![ArtifactSource::new("NoAbi.json", r#"{"bytecode": "0x"}"#)];
        let err = collect_artifacts(sources, &settings()).unwrap_err();
        assert!(matches!(err, CollectError::MissingAbi { .. }));
    }

    #[test]
    fn test_non_object_document_has_no_abi() {
        let sources = vec![ArtifactSource::new("List.json", "[1, 2, 3]")];
        let err = collect_artifacts(sources, &settings()).unwrap_err();
        assert!(matches!(err, CollectError::MissingAbi { .. }));
    }

    #[test]
    fn test_abi_must_be_array() {
        let sources = vec![ArtifactSource::new("Odd.json", r#"{"abi": {"type": "function"}}"#)];
        let err = collect_artifacts(sources, &settings()).unwrap_err();
        assert!(matches!(err, CollectError::InvalidAbi { .. }));
    }

    #[test]
    fn test_duplicate_names_ignoring_case() {
        let sources = vec![
            ArtifactSource::new("Token.json", r#"{"abi": []}"#),
            ArtifactSource::new("TOKEN.json", r#"{"abi": []}"#),
        ];
        let err = collect_artifacts(sources, &settings()).unwrap_err();
        match err {
            CollectError::DuplicateContract { first, second, .. } => {
                assert_eq!(first, "Token.json");
                assert_eq!(second, "TOKEN.json");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_stem_rejected() {
        let sources = vec![ArtifactSource::new(".json", r#"{"abi": []}"#)];
        assert!(matches!(
            collect_artifacts(sources, &settings()),
            Err(CollectError::EmptyName { .. })
        ));
    }

    #[test]
    fn test_custom_abi_field() {
        let settings = BuildSettings {
            abi_field: "interface".to_string(),
            ..BuildSettings::default()
        };
        let sources = vec![ArtifactSource::new("Vault.json", r#"{"interface": []}"#)];
        let contracts = collect_artifacts(sources, &settings).unwrap();
        assert_eq!(contracts[0].abi, json!([]));
    }

    #[test]
    fn test_missing_dir_fails_before_listing() {
        let store = MemoryArtifactStore::missing("artifacts");
        let err = ArtifactCollector::default().collect(&store).unwrap_err();
        assert!(matches!(err, CollectError::MissingArtifactDir { .. }));
        assert!(err.to_string().contains("artifacts"));
        assert_eq!(store.accesses(), 0);
    }

    #[test]
    fn test_empty_dir_is_ok() {
        let store = MemoryArtifactStore::new("artifacts");
        let contracts = ArtifactCollector::default().collect(&store).unwrap();
        assert!(contracts.is_empty());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("Token.json", ".json"), EntryKind::Artifact("Token"));
        assert_eq!(classify(".gitkeep", ".json"), EntryKind::Hidden);
        assert_eq!(classify(".json", ".json"), EntryKind::Artifact(""));
        assert_eq!(classify("Vault.JSON", ".json"), EntryKind::Unexpected);
        assert_eq!(classify("Bridge.json.bak", ".json"), EntryKind::Unexpected);
    }

    #[test]
    fn test_collector_skips_dirs_and_hidden_files() {
        let store = MemoryArtifactStore::new("artifacts")
            .with_dir("build-info")
            .with_file(".DS_Store", "garbage")
            .with_file("TokenA.json", r#"{"abi": []}"#);
        let contracts = ArtifactCollector::default().collect(&store).unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].name, "TokenA");
        // one list plus one read
        assert_eq!(store.accesses(), 2);
    }

    #[test]
    fn test_collector_rejects_other_extensions() {
        let store = MemoryArtifactStore::new("artifacts")
            .with_file("Token.json", r#"{"abi": []}"#)
            .with_file("Vault.JSON", r#"{"abi": [{"type": "function", "name": "deposit"}]}"#)
            .with_file("Bridge.json.bak", r#"{"abi": []}"#);
        let err = ArtifactCollector::default().collect(&store).unwrap_err();
        assert!(
            matches!(err, CollectError::UnexpectedEntry { ref file, .. } if file == "Vault.JSON")
        );
        assert!(err.to_string().contains("Vault.JSON"));
    }

    #[test]
    fn test_pure_collect_rejects_other_extensions() {
        let sources = vec![
            ArtifactSource::new("Token.json", r#"{"abi": []}"#),
            ArtifactSource::new("notes.txt", "hello"),
        ];
        assert!(matches!(
            collect_artifacts(sources, &settings()),
            Err(CollectError::UnexpectedEntry { .. })
        ));
    }

    #[test]
    fn test_pure_collect_skips_hidden_files() {
        let sources = vec![
            ArtifactSource::new(".gitkeep", ""),
            ArtifactSource::new("Token.json", r#"{"abi": []}"#),
        ];
        let contracts = collect_artifacts(sources, &settings()).unwrap();
        assert_eq!(contracts.len(), 1);
    }
}
