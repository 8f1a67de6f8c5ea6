//! Table loading: spreadsheet sheets to row dictionaries.
//!
//! The first row of every sheet is its header. Each later row becomes one
//! [`RowDictionary`], seeded with the values of the optional
//! `uniplate_globals` sheet. Loaders customise the result through the hook
//! methods of [`TableLoader`], all of which have working defaults.

use std::path::Path;

use tracing::{debug, trace};
use uniplate_odf::spreadsheet::{self, Cell, Sheet};
use uniplate_odf::{DocumentKind, OdfDocument};

use crate::error::{DataError, Result};
use crate::row::RowDictionary;

/// Name of the sheet whose single data row is merged into every row
pub const GLOBALS_SHEET: &str = "uniplate_globals";

/// Separator between group and key in a key-value header (`info::name`)
pub const KEY_VALUE_SEPARATOR: &str = "::";

/// Loaded rows, in sheet then row order
pub type Table = Vec<RowDictionary>;

/// Options controlling how a table is loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Explicit file naming pattern; derived from the first header if unset
    pub naming: Option<String>,
    /// Sheets to process; empty means all
    pub sheets: Vec<String>,
    /// Do not collect empty values into key-value groups
    pub skip_empty: bool,
    /// Fill overflowing key-value placeholders with the last pair
    ///
    /// Not used by the loader itself; carried for the templater.
    pub fill_with_last: bool,
}

impl LoadOptions {
    fn wants_sheet(&self, name: &str) -> bool {
        self.sheets.is_empty() || self.sheets.iter().any(|s| s == name)
    }
}

/// A loaded table with the naming pattern that goes with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub rows: Table,
    pub naming: String,
}

/// Turns a spreadsheet document into a [`Table`]
///
/// Implementors usually override only the hooks; `load_table` drives them.
pub trait TableLoader {
    /// Load every requested sheet of an open spreadsheet
    fn load_table(&self, document: &OdfDocument, options: &LoadOptions) -> Result<LoadedTable> {
        let sheets = spreadsheet::sheets(document);

        let mut globals = RowDictionary::new();
        if let Some(sheet) = sheets.iter().find(|s| s.name == GLOBALS_SHEET) {
            if sheet.rows.len() >= 2 {
                let header = expand_header(&sheet.rows[0]);
                let values = expand_cells(&sheet.rows[1], header.len());
                for (name, value) in header.iter().zip(values) {
                    self.process_cell(&mut globals, name, value, options);
                }
                trace!("Globals: {:?}", globals);
            }
        }

        let mut naming = options.naming.clone();
        let mut table = Table::new();

        for sheet in sheets.iter().filter(|s| s.name != GLOBALS_SHEET) {
            debug!("Processing sheet `{}'", sheet.name);

            if !options.wants_sheet(&sheet.name) {
                debug!("Skipping sheet `{}' - not requested.", sheet.name);
                continue;
            }

            if sheet.rows.len() < 2 {
                debug!("Sheet `{}' is empty.", sheet.name);
                continue;
            }

            let header = expand_header(&sheet.rows[0]);
            if naming.is_none() {
                naming = header.first().map(|first| format!("{{{first}}}"));
            }

            load_sheet_rows(self, sheet, &header, &globals, options, &mut table);
        }

        self.post_process_table(&mut table);

        let naming = match naming {
            Some(naming) => naming,
            None if table.is_empty() => String::new(),
            None => return Err(DataError::NoNamingPattern),
        };
        debug!("Loaded {} rows, naming pattern `{}'", table.len(), naming);

        Ok(LoadedTable {
            rows: table,
            naming,
        })
    }

    /// Store one header/value pair into a row
    fn process_cell(&self, row: &mut RowDictionary, header: &str, value: String, options: &LoadOptions) {
        store_cell(row, header, value, options);
    }

    /// Derive extra fields once a row is complete
    fn post_process_row(&self, _row: &mut RowDictionary) {}

    /// Filter or reorder the finished table
    fn post_process_table(&self, _table: &mut Table) {}
}

/// The stock loader: every hook keeps its default
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTableLoader;

impl TableLoader for DefaultTableLoader {}

/// Open a spreadsheet file and load it with the given loader
pub fn load_table_file<L, P>(loader: &L, path: P, options: &LoadOptions) -> Result<LoadedTable>
where
    L: TableLoader + ?Sized,
    P: AsRef<Path>,
{
    let document = OdfDocument::open(path, DocumentKind::Spreadsheet)?;
    loader.load_table(&document, options)
}

/// Build one row dictionary per data row of a sheet
fn load_sheet_rows<L: TableLoader + ?Sized>(
    loader: &L,
    sheet: &Sheet,
    header: &[String],
    globals: &RowDictionary,
    options: &LoadOptions,
    table: &mut Table,
) {
    for cells in &sheet.rows[1..] {
        let mut row = globals.clone();
        let values = expand_cells(cells, header.len());
        for (name, value) in header.iter().zip(values) {
            loader.process_cell(&mut row, name, value, options);
        }
        trace!("{:?}", row);
        loader.post_process_row(&mut row);
        table.push(row);
    }
}

/// Default cell classification
///
/// A header of the form `group::key` appends `(key, value)` to the
/// `group` list; any other header stores a scalar. With `skip_empty`, an
/// empty value is not appended, but the group is still created.
pub fn store_cell(row: &mut RowDictionary, header: &str, value: String, options: &LoadOptions) {
    if let Some((group, key)) = split_key_value(header) {
        if options.skip_empty && value.is_empty() {
            row.ensure_group(group);
        } else {
            row.push_pair(group, key, value);
        }
        return;
    }
    row.insert(header, value);
}

/// Split `group::key`; `None` unless the separator occurs exactly once
pub fn split_key_value(header: &str) -> Option<(&str, &str)> {
    let mut parts = header.split(KEY_VALUE_SEPARATOR);
    let group = parts.next()?;
    let key = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((group, key))
}

/// Expand repeated cells into at most `limit` values, padding with `""`
pub fn expand_cells(cells: &[Cell], limit: usize) -> Vec<String> {
    let mut values = Vec::with_capacity(limit);
    for cell in cells {
        let room = limit - values.len();
        if room == 0 {
            break;
        }
        values.extend(std::iter::repeat(cell.text.clone()).take(cell.repeat.min(room)));
    }
    values.resize(limit, String::new());
    values
}

/// Expand a header row, dropping trailing blank names
///
/// Spreadsheet editors end rows with one empty cell repeated up to the
/// sheet width; those columns carry no field name.
pub fn expand_header(cells: &[Cell]) -> Vec<String> {
    let named = cells
        .iter()
        .rposition(|cell| !cell.text.trim().is_empty())
        .map_or(0, |last| last + 1);

    cells[..named]
        .iter()
        .flat_map(|cell| std::iter::repeat(cell.text.clone()).take(cell.repeat))
        .collect()
}
