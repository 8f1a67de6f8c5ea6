//! Error types for table loading.

use thiserror::Error;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading a table
#[derive(Debug, Error)]
pub enum DataError {
    /// The table document could not be opened or has the wrong kind
    #[error(transparent)]
    Document(#[from] uniplate_odf::OdfError),

    /// Rows were loaded but no naming pattern was given or derivable
    #[error("No naming pattern: pass one explicitly, the first sheet has no header")]
    NoNamingPattern,
}
