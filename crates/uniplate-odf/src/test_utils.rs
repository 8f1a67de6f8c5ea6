//! Shared test utilities for uniplate crates
//!
//! In-memory `.ods` / `.odg` builders. Other crates reach these through the
//! `test-utils` feature in their dev-dependencies.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::names::{MIME_GRAPHICS, MIME_SPREADSHEET};

const OFFICE_NS: &str = r#"xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:draw="urn:oasis:names:tc:opendocument:xmlns:drawing:1.0" xmlns:svg="urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0" office:version="1.3""#;

/// Build a container from raw parts
///
/// `mimetype` of `None` leaves the entry out entirely.
pub fn container_bytes(mimetype: Option<&str>, content: &str, styles: Option<&str>) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    if let Some(mimetype) = mimetype {
        zip.start_file("mimetype", stored).unwrap();
        zip.write_all(mimetype.as_bytes()).unwrap();
    }

    zip.start_file("content.xml", stored).unwrap();
    zip.write_all(content.as_bytes()).unwrap();

    if let Some(styles) = styles {
        zip.start_file("styles.xml", stored).unwrap();
        zip.write_all(styles.as_bytes()).unwrap();
    }

    zip.start_file("META-INF/manifest.xml", stored).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.3">
  <manifest:file-entry manifest:full-path="/" manifest:media-type="{}"/>
  <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
</manifest:manifest>"#,
            mimetype.unwrap_or_default()
        )
        .as_bytes(),
    )
    .unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

/// A spreadsheet whose `office:spreadsheet` holds the given `table:table` XML
pub fn spreadsheet_from_tables(tables: &str) -> Vec<u8> {
    let content = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content {OFFICE_NS}><office:body><office:spreadsheet>{tables}</office:spreadsheet></office:body></office:document-content>"#
    );
    container_bytes(Some(MIME_SPREADSHEET), &content, None)
}

/// A spreadsheet with plain string cells, one `(name, rows)` per sheet
pub fn spreadsheet_bytes(sheets: &[(&str, Vec<Vec<&str>>)]) -> Vec<u8> {
    let mut tables = String::new();
    for (name, rows) in sheets {
        tables.push_str(&format!(r#"<table:table table:name="{}">"#, escape(name)));
        for row in rows {
            tables.push_str("<table:table-row>");
            for cell in row {
                if cell.is_empty() {
                    tables.push_str("<table:table-cell/>");
                } else {
                    tables.push_str(&format!(
                        r#"<table:table-cell office:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
                        escape(cell)
                    ));
                }
            }
            tables.push_str("</table:table-row>");
        }
        tables.push_str("</table:table>");
    }
    spreadsheet_from_tables(&tables)
}

/// A drawing whose `office:drawing` holds the given page XML
pub fn graphics_bytes(pages: &str) -> Vec<u8> {
    graphics_with_master(pages, None)
}

/// A drawing with optional master-page XML in `styles.xml`
pub fn graphics_with_master(pages: &str, master_page: Option<&str>) -> Vec<u8> {
    let content = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content {OFFICE_NS}><office:body><office:drawing>{pages}</office:drawing></office:body></office:document-content>"#
    );
    let styles = master_page.map(|master| {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles {OFFICE_NS}><office:master-styles>{master}</office:master-styles></office:document-styles>"#
        )
    });
    container_bytes(Some(MIME_GRAPHICS), &content, styles.as_deref())
}

/// A single-page drawing with one text box per paragraph
pub fn graphics_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let mut page = String::from(r#"<draw:page draw:name="page1">"#);
    for text in paragraphs {
        page.push_str(&format!(
            r#"<draw:frame><draw:text-box><text:p>{}</text:p></draw:text-box></draw:frame>"#,
            escape(text)
        ));
    }
    page.push_str("</draw:page>");
    graphics_bytes(&page)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
