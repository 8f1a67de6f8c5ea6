//! Error types for the template engine and pipeline

use std::path::PathBuf;

use thiserror::Error;
use uniplate_data::DataError;
use uniplate_odf::OdfError;

/// Errors that stop a run
#[derive(Error, Debug)]
pub enum EngineError {
    /// Output directory does not exist or is not a directory
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Template or table path does not exist or is not a file
    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),

    /// The template could not be loaded
    #[error("Cannot load template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: OdfError,
    },

    /// The table could not be loaded
    #[error("Cannot load table {}: {source}", .path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: DataError,
    },

    /// A generated document could not be written
    #[error("Cannot save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: OdfError,
    },

    /// Error from a document operation inside a hook
    #[error(transparent)]
    Document(#[from] OdfError),

    /// Other IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
