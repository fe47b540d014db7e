//! abi-bindgen-core — collect compiled contract artifacts and build the
//! configuration an ABI binding generator consumes.

pub mod abi;
pub mod artifact;
pub mod build_support;
pub mod config;
pub mod error;
pub mod exports;
pub mod settings;
pub mod store;

pub use abi::{signatures, AbiItemKind, AbiSummary};
pub use artifact::{
    classify, collect_artifacts, contract_name, ArtifactCollector, ArtifactSource, ContractArtifact,
    EntryKind,
};
pub use config::{BindgenConfig, PluginConfig};
pub use error::{CollectError, SettingsError};
pub use exports::{ExportEntry, ExportIndex};
pub use settings::BuildSettings;
pub use store::{ArtifactEntry, ArtifactStore, FsArtifactStore, MemoryArtifactStore};
