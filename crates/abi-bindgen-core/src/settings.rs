use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings file looked up in the current directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "abi-bindgen.toml";

pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const DEFAULT_OUT: &str = "src/bindings.rs";
pub const DEFAULT_EXTENSION: &str = ".json";
pub const DEFAULT_ABI_FIELD: &str = "abi";

/// Well-known locations and names used by the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Directory holding one compiled artifact per contract.
    #[serde(rename = "artifacts")]
    pub artifacts_dir: PathBuf,
    /// Module the binding generator writes.
    pub out: PathBuf,
    /// Suffix stripped from artifact file names to obtain contract names.
    pub extension: String,
    /// Field of the artifact document holding the interface description.
    pub abi_field: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            out: PathBuf::from(DEFAULT_OUT),
            extension: DEFAULT_EXTENSION.to_string(),
            abi_field: DEFAULT_ABI_FIELD.to_string(),
        }
    }
}

impl BuildSettings {
    /// Load settings from an explicit file, else `abi-bindgen.toml` in the
    /// current directory, else defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = config_path {
            return Self::from_file(path);
        }

        let local = Path::new(DEFAULT_SETTINGS_FILE);
        if local.exists() {
            Self::from_file(local)
        } else {
            debug!("no {} found, using default settings", DEFAULT_SETTINGS_FILE);
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: BuildSettings =
            toml::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        debug!(path = %path.display(), "loaded build settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.extension.is_empty() {
            return Err(SettingsError::Invalid(
                "extension cannot be empty".to_string(),
            ));
        }
        if self.abi_field.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "abi_field cannot be empty".to_string(),
            ));
        }
        if self.artifacts_dir.as_os_str().is_empty() {
            return Err(SettingsError::Invalid(
                "artifacts directory cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve relative paths against a build root, e.g. `CARGO_MANIFEST_DIR`.
    pub fn resolved(&self, root: &Path) -> Self {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            }
        };
        Self {
            artifacts_dir: resolve(&self.artifacts_dir),
            out: resolve(&self.out),
            ..self.clone()
        }
    }

    /// Save settings to file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SettingsError::Invalid(e.to_string()))?;
        fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
