//! Error types for OpenDocument operations

use thiserror::Error;

/// Errors that can occur while loading, inspecting or saving a document
#[derive(Error, Debug)]
pub enum OdfError {
    /// Error reading or writing the ZIP container
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute in an XML start tag
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Required file not found in the container
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// The container declares a different document kind than expected
    #[error("{path} is not an OpenDocument {expected} (declared type: {found})")]
    WrongKind {
        /// Path or label of the offending document
        path: String,
        /// Human-readable expected kind
        expected: &'static str,
        /// Declared MIME type, or `none`
        found: String,
    },

    /// Invalid document structure
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),
}

/// Result type for OpenDocument operations
pub type Result<T> = std::result::Result<T, OdfError>;
