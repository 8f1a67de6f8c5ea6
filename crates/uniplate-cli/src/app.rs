//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use uniplate_attestation::{AttestationTableLoader, AttestationTemplater};
use uniplate_data::{DefaultTableLoader, LoadOptions, TableLoader};
use uniplate_engine::{pipeline, DefaultTemplater, RunConfig, RunSummary, Templater, TemplaterOptions};

use crate::config::{load_settings, Settings};

/// Table loader / templater implementations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plugin {
    /// Plain fields and `group::key` columns
    #[default]
    Default,
    /// Grade sheets and two-page certificates
    Attestation,
}

impl Plugin {
    /// Build the table loader for this plugin
    pub fn table_loader(self) -> Box<dyn TableLoader> {
        match self {
            Plugin::Default => Box::new(DefaultTableLoader),
            Plugin::Attestation => Box::new(AttestationTableLoader::new()),
        }
    }

    /// Build the templater for this plugin
    pub fn templater(self, options: TemplaterOptions) -> Box<dyn Templater> {
        match self {
            Plugin::Default => Box::new(DefaultTemplater::new(options)),
            Plugin::Attestation => Box::new(AttestationTemplater::new(options)),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "uniplate")]
#[command(author, version, about = "Fill a document template once per spreadsheet row", long_about = None)]
pub struct Cli {
    /// Template to fill (an OpenDocument drawing, .odg)
    pub template: PathBuf,

    /// Table with data (.ods)
    pub table: PathBuf,

    /// Output directory [default: .]
    #[arg(short, long)]
    pub outdir: Option<PathBuf>,

    /// Be verbose (repeat for more detail)
    #[arg(short, long = "verbosity", action = ArgAction::Count)]
    pub verbose: u8,

    /// File naming pattern, like {field1}_{field2}
    #[arg(short, long)]
    pub naming: Option<String>,

    /// Sheet to process (can occur more than once)
    #[arg(short, long = "sheet")]
    pub sheets: Vec<String>,

    /// Skip empty values in key::value columns
    #[arg(short = 'e', long)]
    pub skip_empty: bool,

    /// Fill key::value placeholders with the last pair instead of blank
    #[arg(short, long)]
    pub fill_with_last: bool,

    /// Table loader implementation
    #[arg(long, value_enum)]
    pub table_loader: Option<Plugin>,

    /// Templater implementation
    #[arg(long, value_enum)]
    pub templater: Option<Plugin>,

    /// Configuration file [default: ./uniplate.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// A fully resolved invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    pub run: RunConfig,
    pub table_loader: Plugin,
    pub templater: Plugin,
}

impl Cli {
    /// Merge flags over settings over defaults
    pub fn resolve(&self, settings: &Settings) -> Invocation {
        let sheets = if self.sheets.is_empty() {
            settings.table.sheets.clone()
        } else {
            self.sheets.clone()
        };

        let load = LoadOptions {
            naming: self.naming.clone().or_else(|| settings.output.naming.clone()),
            sheets,
            skip_empty: self.skip_empty || settings.table.skip_empty,
            fill_with_last: self.fill_with_last || settings.template.fill_with_last,
        };

        Invocation {
            run: RunConfig {
                template: self.template.clone(),
                table: self.table.clone(),
                outdir: self
                    .outdir
                    .clone()
                    .or_else(|| settings.output.dir.clone())
                    .unwrap_or_else(|| PathBuf::from(".")),
                load,
            },
            table_loader: self
                .table_loader
                .or(settings.plugins.table_loader)
                .unwrap_or_default(),
            templater: self.templater.or(settings.plugins.templater).unwrap_or_default(),
        }
    }
}

/// Main CLI entry point
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = load_settings(cli.config.as_deref(), Path::new("."))?;
    run(&cli.resolve(&settings))?;
    Ok(())
}

/// Execute a resolved invocation
pub fn run(invocation: &Invocation) -> Result<RunSummary> {
    debug!(
        "Table loader {:?}, templater {:?}",
        invocation.table_loader, invocation.templater
    );

    let loader = invocation.table_loader.table_loader();
    let templater = invocation.templater;
    pipeline::run(&invocation.run, loader.as_ref(), |options| templater.templater(options))
        .with_context(|| {
            format!(
                "Failed to fill {} from {}",
                invocation.run.template.display(),
                invocation.run.table.display()
            )
        })
}

/// Log filter for a `-v` count: warn, info, debug, then trace
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Send log output to stderr; `RUST_LOG` takes precedence over `-v`
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbose)));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
