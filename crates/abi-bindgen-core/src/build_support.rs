//! Helpers for calling the collector from a `build.rs`.

use crate::config::BindgenConfig;
use crate::error::Result;
use crate::settings::BuildSettings;
use std::path::Path;

/// `cargo:rerun-if-changed` lines covering the artifact directory and, when
/// given, the settings file.
pub fn rerun_directives(settings: &BuildSettings, settings_file: Option<&Path>) -> Vec<String> {
    let mut lines = vec![format!(
        "cargo:rerun-if-changed={}",
        settings.artifacts_dir.display()
    )];
    if let Some(file) = settings_file {
        lines.push(format!("cargo:rerun-if-changed={}", file.display()));
    }
    lines
}

/// Build the configuration with paths resolved against `manifest_dir`,
/// printing the rerun directives first.
pub fn build_for_manifest(settings: &BuildSettings, manifest_dir: &Path) -> Result<BindgenConfig> {
    let settings = settings.resolved(manifest_dir);
    for line in rerun_directives(&settings, None) {
        println!("{}", line);
    }
    BindgenConfig::build(&settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectError;
    use std::fs;

    #[test]
    fn test_directives() {
        let lines = rerun_directives(
            &BuildSettings::default(),
            Some(Path::new("abi-bindgen.toml")),
        );
        assert_eq!(
            lines,
            vec![
                "cargo:rerun-if-changed=artifacts",
                "cargo:rerun-if-changed=abi-bindgen.toml",
            ]
        );
    }

    #[test]
    fn test_build_for_manifest_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("artifacts")).unwrap();
        fs::write(dir.path().join("artifacts/TokenA.json"), r#"{"abi": []}"#).unwrap();

        let config = build_for_manifest(&BuildSettings::default(), dir.path()).unwrap();
        assert_eq!(config.contract_names(), vec!["TokenA"]);
        assert_eq!(config.out, dir.path().join("src/bindings.rs"));
    }

    #[test]
    fn test_build_for_manifest_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_for_manifest(&BuildSettings::default(), dir.path()).unwrap_err();
        assert!(matches!(err, CollectError::MissingArtifactDir { .. }));
    }
}
