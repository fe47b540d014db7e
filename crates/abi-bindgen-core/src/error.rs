use std::path::PathBuf;
use thiserror::Error;

/// Failures while collecting contract artifacts.
///
/// Every variant is fatal: a partial binding set would silently drop a
/// contract's interface, so nothing here is skipped or retried.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error(
        "Missing artifacts in `{}`: run the contract compilation step first",
        path.display()
    )]
    MissingArtifactDir { path: PathBuf },

    #[error("Failed to read artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {file}: {source}")]
    Malformed {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Artifact {file} has no `{field}` field")]
    MissingAbi { file: String, field: String },

    #[error("Artifact {file}: `{field}` must be an array of interface entries")]
    InvalidAbi { file: String, field: String },

    #[error("Unexpected file {file} in artifact directory: artifacts must end in `{extension}`")]
    UnexpectedEntry { file: String, extension: String },

    #[error("Artifact file name {} is not valid UTF-8", path.display())]
    NonUtf8Name { path: PathBuf },

    #[error("Artifact {file} has an empty contract name")]
    EmptyName { file: String },

    #[error("Duplicate contract name `{name}` (from {first} and {second})")]
    DuplicateContract {
        name: String,
        first: String,
        second: String,
    },
}

/// Failures while loading build settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write settings file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

pub type Result<T, E = CollectError> = std::result::Result<T, E>;
