use crate::{ConfigFormat, OutputFormat};
use abi_bindgen_core::build_support::rerun_directives;
use abi_bindgen_core::settings::DEFAULT_SETTINGS_FILE;
use abi_bindgen_core::{signatures, BindgenConfig, BuildSettings, ExportIndex};
use anyhow::{Context, Result};
use colored::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::info;

fn build(settings: &BuildSettings) -> Result<BindgenConfig> {
    BindgenConfig::build(settings).with_context(|| {
        format!(
            "Failed to collect artifacts from {}",
            settings.artifacts_dir.display()
        )
    })
}

pub fn config(settings: &BuildSettings, format: ConfigFormat, output: Option<&Path>) -> Result<()> {
    let config = build(settings)?;
    let rendered = match format {
        ConfigFormat::Json => config.to_json()?,
        ConfigFormat::Yaml => config.to_yaml()?,
    };

    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), contracts = config.contracts.len(), "wrote configuration");
            eprintln!(
                "{} Wrote configuration for {} contracts to {}",
                "✓".green(),
                config.contracts.len(),
                path.display()
            );
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

pub fn list(settings: &BuildSettings, format: OutputFormat, show_signatures: bool) -> Result<()> {
    let config = build(settings)?;

    match format {
        OutputFormat::Json => {
            let contracts: Vec<_> = config
                .contracts
                .iter()
                .map(|c| {
                    let mut entry = json!({
                        "name": c.name,
                        "summary": c.summary(),
                    });
                    if show_signatures {
                        entry["signatures"] = json!(signatures(&c.abi));
                    }
                    entry
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&contracts)?);
        }
        OutputFormat::Human => {
            if config.contracts.is_empty() {
                println!(
                    "{}",
                    format!("No artifacts in {}", settings.artifacts_dir.display()).yellow()
                );
                return Ok(());
            }
            for contract in &config.contracts {
                println!("{}  {}", contract.name.bold(), contract.summary().to_string().dimmed());
                if show_signatures {
                    for sig in signatures(&contract.abi) {
                        println!("    {}", sig);
                    }
                }
            }
            println!("\nTotal: {} contracts", config.contracts.len());
        }
    }
    Ok(())
}

/// Exits non-zero when the artifacts cannot be collected.
pub fn check(settings: &BuildSettings) {
    match BindgenConfig::build(settings) {
        Ok(config) => {
            println!(
                "{} {} contracts collected from {}",
                "✓".green().bold(),
                config.contracts.len(),
                settings.artifacts_dir.display()
            );
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e.to_string().red());
            std::process::exit(1);
        }
    }
}

pub fn exports(settings: &BuildSettings, format: OutputFormat) -> Result<()> {
    let index = ExportIndex::from_config(&build(settings)?);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&index)?),
        OutputFormat::Human => {
            for entry in &index.entries {
                println!("{}  {}", entry.type_name.bold(), entry.factory.cyan());
            }
        }
    }
    Ok(())
}

pub fn fingerprint(settings: &BuildSettings) -> Result<()> {
    println!("{}", build(settings)?.fingerprint());
    Ok(())
}

pub fn rerun(settings: &BuildSettings, settings_file: Option<&Path>) {
    let local = Path::new(DEFAULT_SETTINGS_FILE);
    let settings_file = settings_file.or_else(|| local.exists().then_some(local));
    for line in rerun_directives(settings, settings_file) {
        println!("{}", line);
    }
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    BuildSettings::default().save(path)?;
    println!("{} Wrote default settings to {}", "✓".green(), path.display());
    Ok(())
}
