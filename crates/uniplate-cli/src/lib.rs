//! uniplate CLI - Command-line interface library
//!
//! Argument parsing, `uniplate.toml` settings, logging setup and the
//! plugin switch between the default and attestation implementations.
//!
//! # Library Usage
//!
//! ```ignore
//! use uniplate_cli::{run, Cli, Settings};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["uniplate", "card.odg", "people.ods", "-o", "out"]);
//! let summary = run(&cli.resolve(&Settings::default()))?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # One card per row, named after the first column
//! uniplate card.odg people.ods -o out
//!
//! # Grade certificates from two sheets, named by full name
//! uniplate certificate.odg grades.ods -s "Class A" -s "Class B" \
//!     --table-loader attestation --templater attestation -n "{name}"
//! ```

pub mod app;
pub mod config;

// Re-export main entry point and types
pub use app::{init_logging, run, run_cli, verbosity_filter, Cli, Invocation, Plugin};
pub use config::{load_settings, Settings, CONFIG_FILE};
