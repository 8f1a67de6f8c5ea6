//! Placeholder substitution
//!
//! Scalar fields replace `{name}`. Key-value groups replace
//! `{name::key::i}` and `{name::value::i}` for every pair index `i`; any
//! such token left over (an index past the end of the group) is either
//! erased or filled with the last pair.

use uniplate_data::FieldValue;
use uniplate_odf::OdfDocument;

/// Substitute one field into a string
pub fn substitute(text: &str, name: &str, value: &FieldValue, fill_with_last: bool) -> String {
    match value {
        FieldValue::Scalar(scalar) => text.replace(&scalar_token(name), scalar),
        FieldValue::Pairs(pairs) => substitute_pairs(text, name, pairs, fill_with_last),
    }
}

/// Whether `text` contains anything `substitute` would touch for this field
pub fn mentions(text: &str, name: &str, value: &FieldValue) -> bool {
    match value {
        FieldValue::Scalar(_) => text.contains(&scalar_token(name)),
        FieldValue::Pairs(_) => {
            text.contains(&group_prefix(name, "key")) || text.contains(&group_prefix(name, "value"))
        }
    }
}

/// Substitute one field into every paragraph text node of a document
pub fn substitute_document(
    document: &mut OdfDocument,
    name: &str,
    value: &FieldValue,
    fill_with_last: bool,
) {
    document.visit_paragraph_text_mut(&mut |text: &mut String| {
        if mentions(text, name, value) {
            *text = substitute(text, name, value, fill_with_last);
        }
    });
}

fn scalar_token(name: &str) -> String {
    format!("{{{name}}}")
}

fn group_prefix(name: &str, part: &str) -> String {
    format!("{{{name}::{part}::")
}

fn substitute_pairs(
    text: &str,
    name: &str,
    pairs: &[(String, String)],
    fill_with_last: bool,
) -> String {
    let mut out = text.to_string();
    for (i, (key, value)) in pairs.iter().enumerate() {
        out = out.replace(&format!("{{{name}::key::{i}}}"), key);
        out = out.replace(&format!("{{{name}::value::{i}}}"), value);
    }

    let last = pairs.last().filter(|_| fill_with_last);
    out = resolve_overflow(out, &group_prefix(name, "key"), last.map(|(k, _)| k.as_str()));
    out = resolve_overflow(out, &group_prefix(name, "value"), last.map(|(_, v)| v.as_str()));
    out
}

/// Replace every remaining token starting with `prefix`
///
/// A token runs up to the next `}`, or to the end of the text when none
/// follows. Scanning resumes after the inserted text, so a fill value that
/// itself looks like a token is left alone.
fn resolve_overflow(mut text: String, prefix: &str, fill: Option<&str>) -> String {
    let fill = fill.unwrap_or("");
    let mut from = 0;
    while let Some(offset) = text[from..].find(prefix) {
        let start = from + offset;
        let end = text[start..]
            .find('}')
            .map_or(text.len(), |close| start + close + 1);
        text.replace_range(start..end, fill);
        from = start + fill.len();
    }
    text
}
