mod commands;

use abi_bindgen_core::settings::DEFAULT_SETTINGS_FILE;
use abi_bindgen_core::BuildSettings;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "abi-bindgen")]
#[command(about = "Collect contract artifacts and build ABI binding-generator configuration", long_about = None)]
struct Cli {
    /// Directory of compiled contract artifacts
    #[arg(long, global = true, env = "ABI_BINDGEN_ARTIFACTS")]
    artifacts: Option<PathBuf>,

    /// Module the binding generator writes
    #[arg(long, global = true, env = "ABI_BINDGEN_OUT")]
    out: Option<PathBuf>,

    /// Path to settings file (defaults to ./abi-bindgen.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log collector progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print (or write) the binding-generator configuration
    Config {
        #[arg(long, value_enum, default_value = "json")]
        format: ConfigFormat,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List collected contracts
    List {
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Show the canonical signature of every function, event and error
        #[arg(long)]
        signatures: bool,
    },

    /// Verify the artifact directory can be collected
    Check,

    /// Print the symbols a binding package re-exports
    Exports {
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the fingerprint of the collected contracts
    Fingerprint,

    /// Print cargo rerun-if-changed directives for a build script
    Rerun,

    /// Write a settings file with the default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "abi_bindgen_core=debug,abi_bindgen=debug"
    } else {
        "abi_bindgen_core=warn,abi_bindgen=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_settings(cli: &Cli) -> Result<BuildSettings> {
    // 1. Settings file (or defaults)
    let mut settings = BuildSettings::load(cli.config.as_deref())
        .context("Failed to load build settings")?;

    // 2. Flags and environment
    if let Some(dir) = &cli.artifacts {
        settings.artifacts_dir = dir.clone();
    }
    if let Some(out) = &cli.out {
        settings.out = out.clone();
    }
    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Config { format, output } => {
            commands::config(&resolve_settings(&cli)?, *format, output.as_deref())?;
        }
        Commands::List { format, signatures } => {
            commands::list(&resolve_settings(&cli)?, *format, *signatures)?;
        }
        Commands::Check => {
            commands::check(&resolve_settings(&cli)?);
        }
        Commands::Exports { format } => {
            commands::exports(&resolve_settings(&cli)?, *format)?;
        }
        Commands::Fingerprint => {
            commands::fingerprint(&resolve_settings(&cli)?)?;
        }
        Commands::Rerun => {
            commands::rerun(&resolve_settings(&cli)?, cli.config.as_deref());
        }
        Commands::Init { force } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
            commands::init(&path, *force)?;
        }
    }

    Ok(())
}
