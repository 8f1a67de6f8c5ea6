//! Loaded OpenDocument with parsed content and styles
//!
//! A document is opened with the kind the caller expects; a container that
//! declares anything else is rejected at load time.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use tracing::{debug, trace};

use crate::archive::OdfArchive;
use crate::error::{OdfError, Result};
use crate::names::{CONTENT_PATH, MIME_GRAPHICS, MIME_SPREADSHEET, STYLES_PATH, TEXT_P};
use crate::xml::{Element, XmlDocument};

/// The document kinds uniplate reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `.ods` data tables
    Spreadsheet,
    /// `.odg` templates
    Graphics,
}

impl DocumentKind {
    /// Declared MIME type for this kind
    pub fn mimetype(self) -> &'static str {
        match self {
            DocumentKind::Spreadsheet => MIME_SPREADSHEET,
            DocumentKind::Graphics => MIME_GRAPHICS,
        }
    }

    /// Human-readable name, used in diagnostics
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Spreadsheet => "Spreadsheet",
            DocumentKind::Graphics => "Graphics",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An OpenDocument held in memory
#[derive(Debug, Clone)]
pub struct OdfDocument {
    archive: OdfArchive,
    kind: DocumentKind,
    content: XmlDocument,
    styles: Option<XmlDocument>,
}

impl OdfDocument {
    /// Open a document file, checking that it declares the expected kind
    pub fn open<P: AsRef<Path>>(path: P, kind: DocumentKind) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening {} as {}", path.display(), kind);
        let archive = OdfArchive::open(path)?;
        Self::from_archive(archive, &path.display().to_string(), kind)
    }

    /// Load a document from in-memory container bytes
    pub fn from_bytes(bytes: &[u8], kind: DocumentKind) -> Result<Self> {
        let archive = OdfArchive::from_reader(Cursor::new(bytes))?;
        Self::from_archive(archive, "<memory>", kind)
    }

    /// Wrap an unpacked container
    ///
    /// `label` names the document in the `WrongKind` diagnostic.
    pub fn from_archive(archive: OdfArchive, label: &str, kind: DocumentKind) -> Result<Self> {
        let declared = archive.mimetype()?;
        if declared.as_deref() != Some(kind.mimetype()) {
            return Err(OdfError::WrongKind {
                path: label.to_string(),
                expected: kind.label(),
                found: declared.unwrap_or_else(|| "none".to_string()),
            });
        }

        let content = XmlDocument::parse(archive.require(CONTENT_PATH)?)?;
        let styles = archive.get(STYLES_PATH).map(XmlDocument::parse).transpose()?;
        trace!(
            "Loaded {} document ({} entries)",
            kind,
            archive.file_list().count()
        );

        Ok(Self {
            archive,
            kind,
            content,
            styles,
        })
    }

    /// Kind this document was opened as
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Root of `content.xml`
    pub fn content(&self) -> &Element {
        &self.content.root
    }

    /// Mutable root of `content.xml`
    pub fn content_mut(&mut self) -> &mut Element {
        &mut self.content.root
    }

    /// Root of `styles.xml`, when the container has one
    pub fn styles(&self) -> Option<&Element> {
        self.styles.as_ref().map(|s| &s.root)
    }

    /// Mutable roots of every parsed part (content first, then styles)
    pub fn parts_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        std::iter::once(&mut self.content.root).chain(self.styles.as_mut().map(|s| &mut s.root))
    }

    /// Visit every text node inside every paragraph of the document
    ///
    /// Paragraphs in master pages (`styles.xml`) are visited too. A text
    /// node nested in a paragraph that itself sits inside another paragraph
    /// is visited once per enclosing paragraph.
    pub fn visit_paragraph_text_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut String),
    {
        for part in self.parts_mut() {
            part.visit_descendants_mut(TEXT_P, &mut |p: &mut Element| p.visit_text_mut(&mut *f));
        }
    }

    /// Remove every element matching the predicate from all parts
    pub fn remove_elements<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&Element) -> bool,
    {
        self.parts_mut()
            .map(|part| part.remove_descendants(&predicate))
            .sum()
    }

    /// Serialize the parsed parts back into a container
    pub fn to_archive(&self) -> Result<OdfArchive> {
        let mut archive = self.archive.clone();
        archive.set(CONTENT_PATH, self.content.to_bytes()?);
        if let Some(styles) = &self.styles {
            archive.set(STYLES_PATH, styles.to_bytes()?);
        }
        Ok(archive)
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_archive()?.write_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{container_bytes, graphics_bytes};
    use crate::text::element_text;

    #[test]
    fn test_open_graphics() {
        let bytes = graphics_bytes("<draw:page><draw:frame><draw:text-box><text:p>{name}</text:p></draw:text-box></draw:frame></draw:page>");
        let doc = OdfDocument::from_bytes(&bytes, DocumentKind::Graphics).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Graphics);
        assert_eq!(doc.content().descendants(TEXT_P).len(), 1);
    }

    #[test]
    fn test_wrong_kind() {
        let bytes = graphics_bytes("<draw:page/>");
        let err = OdfDocument::from_bytes(&bytes, DocumentKind::Spreadsheet).unwrap_err();
        match err {
            OdfError::WrongKind {
                expected, found, ..
            } => {
                assert_eq!(expected, "Spreadsheet");
                assert_eq!(found, MIME_GRAPHICS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_mimetype_is_wrong_kind() {
        let bytes = container_bytes(None, "<office:document-content/>", None);
        let err = OdfDocument::from_bytes(&bytes, DocumentKind::Graphics).unwrap_err();
        assert!(matches!(err, OdfError::WrongKind { ref found, .. } if found == "none"));
    }

    #[test]
    fn test_missing_content() {
        let mut archive = OdfArchive::default();
        archive.set_string(crate::archive::MIMETYPE_PATH, MIME_GRAPHICS);
        let err = OdfDocument::from_archive(archive, "t.odg", DocumentKind::Graphics).unwrap_err();
        assert!(matches!(err, OdfError::MissingFile(ref p) if p == CONTENT_PATH));
    }

    #[test]
    fn test_paragraph_text_includes_styles() {
        let bytes = container_bytes(
            Some(MIME_GRAPHICS),
            r#"<office:document-content><office:body><office:drawing><draw:page><text:p>body {x}</text:p></draw:page></office:drawing></office:body></office:document-content>"#,
            Some(r#"<office:document-styles><office:master-styles><style:master-page><text:p>footer {x}</text:p></style:master-page></office:master-styles></office:document-styles>"#),
        );
        let mut doc = OdfDocument::from_bytes(&bytes, DocumentKind::Graphics).unwrap();

        let mut seen = Vec::new();
        doc.visit_paragraph_text_mut(&mut |text: &mut String| {
            seen.push(text.clone());
            *text = text.replace("{x}", "1");
        });
        assert_eq!(seen, vec!["body {x}", "footer {x}"]);

        let styles = doc.styles().unwrap();
        assert_eq!(element_text(styles.descendants(TEXT_P)[0]), "footer 1");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.odg");

        let bytes = graphics_bytes("<draw:page><text:p>{a}</text:p></draw:page>");
        let mut doc = OdfDocument::from_bytes(&bytes, DocumentKind::Graphics).unwrap();
        doc.visit_paragraph_text_mut(&mut |text: &mut String| *text = text.replace("{a}", "A"));
        doc.save(&path).unwrap();

        let reloaded = OdfDocument::open(&path, DocumentKind::Graphics).unwrap();
        let p = reloaded.content().descendants(TEXT_P)[0];
        assert_eq!(element_text(p), "A");
    }
}
