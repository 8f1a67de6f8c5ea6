//! Grade sheet loader
//!
//! A grade sheet has two kinds of columns. Headers starting with `::`
//! hold personal data (`::Name1`, `::BirthYear`, ...) and become scalar
//! fields named in lower case. Every other non-blank header is a subject;
//! its grade is spelled out and appended to the `mark` group.

use chrono::{Datelike, Local};
use tracing::debug;
use uniplate_data::{LoadOptions, RowDictionary, Table, TableLoader};

use crate::date::format_birth_date;

/// Prefix of personal data headers
pub const FIELD_PREFIX: &str = "::";

/// Group collecting `(subject, grade)` pairs
pub const MARK_GROUP: &str = "mark";

/// Pair appended after the last grade of every row
pub const MARK_SENTINEL: (&str, &str) = ("Z", "Z");

/// Spell out a grade; anything but 3, 4 or 5 becomes empty
pub fn format_mark(value: &str) -> &'static str {
    match value {
        "3" => "3 (удовлетворительно)",
        "4" => "4 (хорошо)",
        "5" => "5 (отлично)",
        _ => "",
    }
}

/// Loader for grade sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttestationTableLoader {
    current_year: i32,
}

impl AttestationTableLoader {
    /// Loader inferring birth centuries from today's date
    pub fn new() -> Self {
        Self::with_current_year(Local::now().year())
    }

    /// Loader inferring birth centuries from a fixed year
    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    fn birth(&self, row: &RowDictionary) -> Option<String> {
        format_birth_date(
            row.scalar("birthyear")?,
            row.scalar("birthmonth")?,
            row.scalar("birthday")?,
            self.current_year,
        )
    }
}

impl Default for AttestationTableLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableLoader for AttestationTableLoader {
    fn process_cell(&self, row: &mut RowDictionary, header: &str, value: String, options: &LoadOptions) {
        if let Some(field) = header.strip_prefix(FIELD_PREFIX) {
            row.insert(field.to_lowercase(), value);
            return;
        }
        if header.trim().is_empty() {
            return;
        }

        let mark = format_mark(&value);
        if options.skip_empty && mark.is_empty() {
            row.ensure_group(MARK_GROUP);
        } else {
            row.push_pair(MARK_GROUP, header, mark);
        }
    }

    fn post_process_row(&self, row: &mut RowDictionary) {
        let name = match (row.scalar("name1"), row.scalar("name2"), row.scalar("name3")) {
            (Some(first), Some(second), Some(third)) => format!("{first} {second} {third}"),
            _ => String::new(),
        };
        row.insert("name", name);

        let birth = self.birth(row).unwrap_or_default();
        row.insert("birth", birth);

        let (key, value) = MARK_SENTINEL;
        row.push_pair(MARK_GROUP, key, value);
    }

    fn post_process_table(&self, table: &mut Table) {
        let before = table.len();
        table.retain(|row| row.scalar("name").is_some_and(|name| !name.trim().is_empty()));
        if table.len() < before {
            debug!("Dropped {} rows without a name", before - table.len());
        }
    }
}
