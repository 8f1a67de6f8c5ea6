//! Run driver: validate inputs, load the table once, template every row.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uniplate_data::{load_table_file, LoadOptions, TableLoader};

use crate::error::{EngineError, Result};
use crate::templater::{Templater, TemplaterOptions, DEFAULT_EXTENSION};

/// Everything a run needs besides the loader and templater choice
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Template document (`.odg`)
    pub template: PathBuf,
    /// Table document (`.ods`)
    pub table: PathBuf,
    /// Existing output directory
    pub outdir: PathBuf,
    /// Table loading options (naming, sheets, skip-empty, fill-with-last)
    pub load: LoadOptions,
}

/// What a completed run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Paths written, in row order
    pub written: Vec<PathBuf>,
}

/// Check that the output directory and both inputs exist
pub fn validate_paths(config: &RunConfig) -> Result<()> {
    if !config.outdir.is_dir() {
        return Err(EngineError::NotADirectory(config.outdir.clone()));
    }
    for path in [&config.template, &config.table] {
        if !path.is_file() {
            return Err(EngineError::NotAFile(path.clone()));
        }
    }
    Ok(())
}

/// Run the whole merge
///
/// `make_templater` receives the options derived from the config and the
/// loaded naming pattern. The first failing row aborts the run; files
/// already written stay on disk.
pub fn run<F>(config: &RunConfig, loader: &dyn TableLoader, make_templater: F) -> Result<RunSummary>
where
    F: FnOnce(TemplaterOptions) -> Box<dyn Templater>,
{
    validate_paths(config)?;

    let loaded = load_table_file(loader, &config.table, &config.load).map_err(|source| {
        EngineError::Table {
            path: config.table.clone(),
            source,
        }
    })?;
    debug!("Table loaded: {} rows", loaded.rows.len());

    let options = TemplaterOptions {
        template: config.template.clone(),
        outdir: config.outdir.clone(),
        naming: loaded.naming,
        fill_with_last: config.load.fill_with_last,
        extension: extension_of(&config.template),
    };
    let mut templater = make_templater(options);

    debug!("Processing entries");
    let mut summary = RunSummary::default();
    for row in &loaded.rows {
        summary.written.push(templater.template_file(row)?);
    }

    info!("Generated {} documents", summary.written.len());
    Ok(summary)
}

/// Output extension: the template's own, lower-cased, or `odg`
fn extension_of(template: &Path) -> String {
    template
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map_or_else(|| DEFAULT_EXTENSION.to_string(), str::to_lowercase)
}
