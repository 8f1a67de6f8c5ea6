//! # uniplate-odf
//!
//! Minimal OpenDocument model for uniplate.
//!
//! This crate provides functionality to:
//! - Read and write ODF containers (`.ods`, `.odg`)
//! - Check the declared document kind
//! - Walk and mutate the XML of `content.xml` and `styles.xml`
//! - Flatten cells and paragraphs into plain text
//!
//! ## Example: Reading a Spreadsheet
//!
//! ```no_run
//! use uniplate_odf::{spreadsheet, DocumentKind, OdfDocument};
//!
//! let document = OdfDocument::open("table.ods", DocumentKind::Spreadsheet)?;
//! for sheet in spreadsheet::sheets(&document) {
//!     println!("{}: {} rows", sheet.name, sheet.rows.len());
//! }
//! # Ok::<(), uniplate_odf::OdfError>(())
//! ```
//!
//! Placeholders are matched inside single text nodes only: text split
//! across spans by an editor is not joined back together.

pub mod archive;
pub mod document;
pub mod error;
pub mod names;
pub mod spreadsheet;
pub mod text;
pub mod xml;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use archive::OdfArchive;
pub use document::{DocumentKind, OdfDocument};
pub use error::{OdfError, Result};
pub use spreadsheet::{Cell, Sheet};
pub use text::{cell_text, element_text, node_text};
pub use xml::{Element, Node, XmlDocument};
