//! Per-row document generation
//!
//! A [`Templater`] turns one row dictionary into one output document:
//! reload the template, run the pre-process hook, substitute every field
//! into the document and into the naming pattern, run the post-process
//! hook, pick a free file name and save.
//!
//! # Example
//!
//! ```ignore
//! use uniplate_engine::{DefaultTemplater, Templater, TemplaterOptions};
//!
//! let mut templater = DefaultTemplater::new(TemplaterOptions::new("card.odg", "out", "{name}"));
//! for row in &table {
//!     templater.template_file(row)?;
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};
use uniplate_data::RowDictionary;
use uniplate_odf::{DocumentKind, OdfDocument};

use crate::error::{EngineError, Result};
use crate::substitute::{substitute, substitute_document};

/// Default extension of generated files
pub const DEFAULT_EXTENSION: &str = "odg";

/// Characters replaced in generated file names
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// Writes a finished document to its output path
pub type SaveCallback = Box<dyn FnMut(&OdfDocument, &Path) -> Result<()>>;

/// Options shared by every templater
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplaterOptions {
    /// Template document, reloaded for every row
    pub template: PathBuf,
    /// Directory receiving generated files
    pub outdir: PathBuf,
    /// File naming pattern, e.g. `{name}_{surname}`
    pub naming: String,
    /// Fill overflowing key-value placeholders with the last pair
    pub fill_with_last: bool,
    /// Extension of generated files, without the dot
    pub extension: String,
}

impl TemplaterOptions {
    pub fn new(
        template: impl Into<PathBuf>,
        outdir: impl Into<PathBuf>,
        naming: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            outdir: outdir.into(),
            naming: naming.into(),
            fill_with_last: false,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_fill_with_last(mut self, fill_with_last: bool) -> Self {
        self.fill_with_last = fill_with_last;
        self
    }
}

/// Generates one output document per row
///
/// Implementors supply `options` and `save`; the hooks default to no-ops
/// and `template_file` drives the whole sequence. The freshly loaded
/// document is owned by a single `template_file` call and dropped once
/// saved.
pub trait Templater {
    /// Options this templater was built with
    fn options(&self) -> &TemplaterOptions;

    /// Write a finished document
    fn save(&mut self, document: &OdfDocument, path: &Path) -> Result<()>;

    /// Adjust the pristine template before any substitution
    fn preprocess_file(&mut self, _document: &mut OdfDocument, _row: &RowDictionary) -> Result<()> {
        Ok(())
    }

    /// Adjust the document after substitution, before saving
    fn postprocess_file(&mut self, _document: &mut OdfDocument, _row: &RowDictionary) -> Result<()> {
        Ok(())
    }

    /// Produce the output document for one row, returning its path
    fn template_file(&mut self, row: &RowDictionary) -> Result<PathBuf> {
        let mut document = load_template(&self.options().template)?;

        self.preprocess_file(&mut document, row)?;

        let fill_with_last = self.options().fill_with_last;
        let mut filename = self.options().naming.clone();
        for (name, value) in row.iter() {
            trace!("Substituting `{}'", name);
            substitute_document(&mut document, name, value, fill_with_last);
            filename = substitute(&filename, name, value, fill_with_last);
        }

        self.postprocess_file(&mut document, row)?;

        let options = self.options();
        let path = unique_output_path(&options.outdir, &filename, &options.extension);
        info!("Saving {}", path.display());

        self.save(&document, &path)?;
        Ok(path)
    }
}

/// Load a pristine copy of the template
///
/// Anything that is not a graphics container is rejected.
pub fn load_template(path: &Path) -> Result<OdfDocument> {
    debug!("Loading template {}", path.display());
    OdfDocument::open(path, DocumentKind::Graphics).map_err(|source| EngineError::Template {
        path: path.to_path_buf(),
        source,
    })
}

/// Pick `<dir>/<base>.<ext>`, or the first free `<base>_N.<ext>`
///
/// Path separators in `base` become `_`, so a field value can never
/// point outside `dir`. Not atomic: another writer may take the name
/// between the check and the save.
pub fn unique_output_path(dir: &Path, base: &str, extension: &str) -> PathBuf {
    let base = base.replace(PATH_SEPARATORS, "_");
    let candidate = dir.join(format!("{base}.{extension}"));
    if !candidate.exists() {
        return candidate;
    }

    let mut suffix = 1;
    loop {
        let candidate = dir.join(format!("{base}_{suffix}.{extension}"));
        if !candidate.exists() {
            debug!("{base}.{extension} exists, using suffix {suffix}");
            return candidate;
        }
        suffix += 1;
    }
}

/// Write a document to `path` with its container intact
pub fn save_document(document: &OdfDocument, path: &Path) -> Result<()> {
    document.save(path).map_err(|source| EngineError::Save {
        path: path.to_path_buf(),
        source,
    })
}

/// The stock templater
pub struct DefaultTemplater {
    options: TemplaterOptions,
    save_callback: SaveCallback,
}

impl DefaultTemplater {
    /// Create a templater that writes documents to disk
    pub fn new(options: TemplaterOptions) -> Self {
        Self {
            options,
            save_callback: Box::new(save_document),
        }
    }

    /// Replace what happens to a finished document
    pub fn with_save_callback(mut self, callback: SaveCallback) -> Self {
        self.save_callback = callback;
        self
    }
}

impl fmt::Debug for DefaultTemplater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultTemplater")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Templater for DefaultTemplater {
    fn options(&self) -> &TemplaterOptions {
        &self.options
    }

    fn save(&mut self, document: &OdfDocument, path: &Path) -> Result<()> {
        (self.save_callback)(document, path)
    }
}
