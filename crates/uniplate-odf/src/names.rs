//! Qualified names and MIME types used by uniplate

/// Spreadsheet document MIME type (`.ods`)
pub const MIME_SPREADSHEET: &str = "application/vnd.oasis.opendocument.spreadsheet";
/// Graphics document MIME type (`.odg`)
pub const MIME_GRAPHICS: &str = "application/vnd.oasis.opendocument.graphics";

/// Main content part
pub const CONTENT_PATH: &str = "content.xml";
/// Styles part (master pages live here)
pub const STYLES_PATH: &str = "styles.xml";

pub const OFFICE_SPREADSHEET: &str = "office:spreadsheet";
pub const TABLE_TABLE: &str = "table:table";
pub const TABLE_ROW: &str = "table:table-row";
pub const TABLE_CELL: &str = "table:table-cell";
pub const TABLE_NAME: &str = "table:name";
pub const TABLE_COLUMNS_REPEATED: &str = "table:number-columns-repeated";
pub const TEXT_P: &str = "text:p";
pub const DRAW_LINE: &str = "draw:line";
pub const DRAW_NAME: &str = "draw:name";
