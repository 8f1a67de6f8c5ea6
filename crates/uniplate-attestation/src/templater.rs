//! Two-page certificate templater
//!
//! The certificate template has room for 21 grades on its first page and
//! 21 more on the second. A large "Z" built from lines named `bigZ_*`
//! crosses out the unused second page.

use std::ops::Range;
use std::path::Path;

use tracing::debug;
use uniplate_data::{FieldValue, RowDictionary};
use uniplate_engine::{
    substitute_document, DefaultTemplater, Result, SaveCallback, Templater, TemplaterOptions,
};
use uniplate_odf::names::{DRAW_LINE, DRAW_NAME};
use uniplate_odf::OdfDocument;

use crate::loader::MARK_GROUP;

/// Marks (sentinel included) that still fit on the first page
pub const FIRST_PAGE_MARKS: usize = 22;

/// Name fragment of the lines drawing the crossing-out "Z"
pub const BIG_Z_MARKER: &str = "bigZ_";

/// Mark indices placed on the second page
pub const SECOND_PAGE_SLOTS: Range<usize> = 21..42;

/// Templater for grade certificates
#[derive(Debug)]
pub struct AttestationTemplater {
    inner: DefaultTemplater,
}

impl AttestationTemplater {
    pub fn new(options: TemplaterOptions) -> Self {
        Self {
            inner: DefaultTemplater::new(options),
        }
    }

    /// Replace what happens to a finished document
    pub fn with_save_callback(self, callback: SaveCallback) -> Self {
        Self {
            inner: self.inner.with_save_callback(callback),
        }
    }
}

impl Templater for AttestationTemplater {
    fn options(&self) -> &TemplaterOptions {
        self.inner.options()
    }

    fn save(&mut self, document: &OdfDocument, path: &Path) -> Result<()> {
        self.inner.save(document, path)
    }

    fn preprocess_file(&mut self, document: &mut OdfDocument, row: &RowDictionary) -> Result<()> {
        let Some(marks) = row.pairs(MARK_GROUP) else {
            return Ok(());
        };

        if marks.len() > FIRST_PAGE_MARKS {
            let removed = document.remove_elements(|element| {
                element.name == DRAW_LINE
                    && element
                        .attribute(DRAW_NAME)
                        .is_some_and(|name| name.contains(BIG_Z_MARKER))
            });
            debug!("Second page active, removed {} lines", removed);
        } else {
            let blank = FieldValue::from("");
            for i in SECOND_PAGE_SLOTS {
                for part in ["key", "value"] {
                    let token = format!("{MARK_GROUP}::{part}::{i}");
                    substitute_document(document, &token, &blank, false);
                }
            }
        }
        Ok(())
    }
}
