//! # uniplate-data
//!
//! Table loading for uniplate - read the sheets of an OpenDocument
//! spreadsheet and turn every data row into a row dictionary.
//!
//! ## Features
//!
//! - **Repeated columns**: `table:number-columns-repeated` cells are expanded
//!   against the header
//! - **Key-value groups**: `group::key` headers collect `(key, value)` pairs
//! - **Globals**: the `uniplate_globals` sheet seeds every row
//! - **Hooks**: [`TableLoader`] methods for per-cell, per-row and per-table
//!   customisation
//!
//! ## Example
//!
//! ```rust,ignore
//! use uniplate_data::{load_table_file, DefaultTableLoader, LoadOptions};
//!
//! let loaded = load_table_file(&DefaultTableLoader, "table.ods", &LoadOptions::default())?;
//! for row in &loaded.rows {
//!     println!("{:?}", row);
//! }
//! ```

pub mod error;
pub mod loader;
pub mod row;

// Re-exports
pub use error::{DataError, Result};
pub use loader::{
    expand_cells, expand_header, load_table_file, split_key_value, store_cell, DefaultTableLoader,
    LoadOptions, LoadedTable, Table, TableLoader, GLOBALS_SHEET, KEY_VALUE_SEPARATOR,
};
pub use row::{FieldValue, RowDictionary};
