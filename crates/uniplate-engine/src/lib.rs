//! # uniplate-engine
//!
//! Mail-merge engine for OpenDocument templates.
//!
//! This crate provides functionality to:
//! - Substitute `{field}` and `{group::key::i}` / `{group::value::i}`
//!   placeholders
//! - Generate one document per table row with collision-free file names
//! - Drive a complete run from a table file and a template file
//!
//! ## Example: A Complete Run
//!
//! ```no_run
//! use uniplate_data::{DefaultTableLoader, LoadOptions};
//! use uniplate_engine::{pipeline, DefaultTemplater, RunConfig, Templater};
//!
//! let config = RunConfig {
//!     template: "card.odg".into(),
//!     table: "people.ods".into(),
//!     outdir: "out".into(),
//!     load: LoadOptions::default(),
//! };
//! let summary = pipeline::run(&config, &DefaultTableLoader, |options| {
//!     Box::new(DefaultTemplater::new(options)) as Box<dyn Templater>
//! })?;
//! println!("{} files written", summary.written.len());
//! # Ok::<(), uniplate_engine::EngineError>(())
//! ```

pub mod error;
pub mod pipeline;
pub mod substitute;
pub mod templater;

pub use error::{EngineError, Result};
pub use pipeline::{run, validate_paths, RunConfig, RunSummary};
pub use substitute::{mentions, substitute, substitute_document};
pub use templater::{
    load_template, save_document, unique_output_path, DefaultTemplater, SaveCallback, Templater,
    TemplaterOptions, DEFAULT_EXTENSION,
};
