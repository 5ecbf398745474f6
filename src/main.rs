//! recipe-revision: semantic versioning for recipe documents.
//!
//! Classifies the edits between two recipe snapshots and commits tiered
//! version bumps that respect the allergen safety floor.

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use recipe_revision::{
    cli::{self, BumpCommand, ClassifyCommand, RevisionPaths},
    config::{self, AppConfig, Validatable},
    model::Tier,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "recipe-revision")]
#[command(version)]
#[command(about = "Classify recipe edits and commit tiered version bumps", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected / bump committed
    1  Changes detected
    2  Safety floor present (or bump rejected below it)
    3  Error occurred

EXAMPLES:
    # Classify an edit
    recipe-revision classify saved.json edited.json --catalog catalog.json

    # Machine-readable classification
    recipe-revision classify saved.json edited.json -o json > classification.json

    # Commit a major revision
    recipe-revision bump saved.json edited.json --tier major --notes \"Now contains peanuts\" -O committed.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Snapshot arguments shared by `classify` and `bump`
#[derive(clap::Args)]
struct SnapshotArgs {
    /// Path to the last committed snapshot
    previous: PathBuf,

    /// Path to the edited snapshot
    current: PathBuf,

    /// Catalog JSON used to resolve component references
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Do not report unresolvable component references
    #[arg(long)]
    no_dangling: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

impl SnapshotArgs {
    fn paths(&self) -> RevisionPaths {
        RevisionPaths {
            previous: self.previous.clone(),
            current: self.current.clone(),
            catalog: self.catalog.clone(),
        }
    }

    fn overrides(&self) -> AppConfig {
        AppConfig::builder()
            .report_dangling_references(!self.no_dangling)
            .output_file(self.output_file.clone())
            .build()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the changes between two snapshots
    Classify {
        #[command(flatten)]
        snapshots: SnapshotArgs,

        /// Output format
        #[arg(short, long)]
        output: Option<ReportFormat>,
    },

    /// Classify, enforce the safety floor and commit a version bump
    Bump {
        #[command(flatten)]
        snapshots: SnapshotArgs,

        /// Tier to commit with
        #[arg(long, value_enum)]
        tier: Tier,

        /// Revision notes (required for major bumps)
        #[arg(long)]
        notes: Option<String>,

        /// Author recorded in the audit history
        #[arg(long, env = "RECIPE_REVISION_AUTHOR")]
        author: Option<String>,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (defaults merged with the config file)
    Show,
    /// Write an example .recipe-revision.yaml in the current directory
    Init,
}

/// Load the config file and layer command-line overrides on top.
fn effective_config(cli_config: Option<&std::path::Path>, overrides: &AppConfig) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli_config, overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Classify { snapshots, output } => {
            let mut overrides = snapshots.overrides();
            if let Some(format) = output {
                overrides.output.format = format;
            }
            let command = ClassifyCommand {
                paths: snapshots.paths(),
                config: effective_config(cli.config.as_deref(), &overrides)?,
                quiet: cli.quiet,
            };
            cli::run_classify(&command)
        }

        Commands::Bump {
            snapshots,
            tier,
            notes,
            author,
        } => {
            let command = BumpCommand {
                paths: snapshots.paths(),
                tier,
                notes,
                author,
                config: effective_config(cli.config.as_deref(), &snapshots.overrides())?,
                quiet: cli.quiet,
            };
            cli::run_bump(&command)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to render schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                match &loaded_from {
                    Some(path) => eprintln!("# Loaded from: {}", path.display()),
                    None => eprintln!("# No config file found; showing defaults"),
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let path = PathBuf::from(".recipe-revision.yaml");
                if path.exists() {
                    bail!("{} already exists", path.display());
                }
                std::fs::write(&path, config::generate_example_config())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Created {}", path.display());
                Ok(exit_codes::SUCCESS)
            }
        },

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "recipe-revision", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}
