//! Read-only sheet view over a spreadsheet document

use crate::document::OdfDocument;
use crate::names::{OFFICE_SPREADSHEET, TABLE_CELL, TABLE_COLUMNS_REPEATED, TABLE_NAME, TABLE_ROW, TABLE_TABLE};
use crate::text::cell_text;
use crate::xml::Element;

/// A cell as stored in the file: text plus its column repeat count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Flattened paragraph text
    pub text: String,
    /// Number of consecutive columns this cell occupies (at least 1)
    pub repeat: usize,
}

impl Cell {
    /// Read a `table:table-cell` element
    pub fn from_element(element: &Element) -> Self {
        let repeat = element
            .attribute(TABLE_COLUMNS_REPEATED)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(1);
        Self {
            text: cell_text(element),
            repeat,
        }
    }
}

/// One sheet of a spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name (`table:name`)
    pub name: String,
    /// Rows in document order, each a list of unexpanded cells
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Read a `table:table` element
    ///
    /// Rows inside header-row and row-group containers are included in
    /// document order. Row repeat counts are not expanded.
    pub fn from_element(element: &Element) -> Self {
        let rows = element
            .descendants(TABLE_ROW)
            .into_iter()
            .map(|row| {
                row.descendants(TABLE_CELL)
                    .into_iter()
                    .map(Cell::from_element)
                    .collect()
            })
            .collect();
        Self {
            name: element.attribute(TABLE_NAME).unwrap_or_default().to_string(),
            rows,
        }
    }
}

/// All sheets of a spreadsheet document, in document order
pub fn sheets(document: &OdfDocument) -> Vec<Sheet> {
    document
        .content()
        .descendants(OFFICE_SPREADSHEET)
        .into_iter()
        .flat_map(|spreadsheet| spreadsheet.descendants(TABLE_TABLE))
        .map(Sheet::from_element)
        .collect()
}
