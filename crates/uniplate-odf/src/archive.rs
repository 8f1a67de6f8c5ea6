//! Archive handling for OpenDocument containers
//!
//! ODS and ODG files are ZIP archives containing a `mimetype` entry,
//! `META-INF/manifest.xml` and a handful of XML parts.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{OdfError, Result};

/// Entry holding the declared MIME type of the document
pub const MIMETYPE_PATH: &str = "mimetype";

/// Package manifest, used as a fallback source of the MIME type
pub const MANIFEST_PATH: &str = "META-INF/manifest.xml";

/// Represents an unpacked OpenDocument container
#[derive(Debug, Clone, Default)]
pub struct OdfArchive {
    /// All files in the archive, keyed by path
    files: HashMap<String, Vec<u8>>,
    /// Entry order as found in the source container
    order: Vec<String>,
}

impl OdfArchive {
    /// Open and unpack an OpenDocument file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut result = Self::default();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            result.set(name, contents);
        }

        Ok(result)
    }

    /// Get a file's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get a file's contents by path, failing if it is absent
    pub fn require(&self, path: &str) -> Result<&[u8]> {
        self.get(path)
            .ok_or_else(|| OdfError::MissingFile(path.to_string()))
    }

    /// Check if a file exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// List all files in the archive, in container order
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Set or update a file's contents
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        let path = path.into();
        if !self.files.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.files.insert(path, contents);
    }

    /// Set a file's contents from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.set(path, contents.into().into_bytes());
    }

    /// Remove a file from the archive
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.order.retain(|p| p != path);
        self.files.remove(path)
    }

    /// Declared MIME type of the document
    ///
    /// Read from the `mimetype` entry; falls back to the media type of the
    /// root entry in the manifest. Returns `None` when neither declares one.
    pub fn mimetype(&self) -> Result<Option<String>> {
        if let Some(bytes) = self.get(MIMETYPE_PATH) {
            let declared = String::from_utf8_lossy(bytes).trim().to_string();
            if !declared.is_empty() {
                return Ok(Some(declared));
            }
        }

        match self.get(MANIFEST_PATH) {
            Some(manifest) => manifest_root_media_type(manifest),
            None => Ok(None),
        }
    }

    /// Write the archive to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write the archive to any writer
    ///
    /// The `mimetype` entry goes first and uncompressed, as the ODF
    /// packaging rules require; everything else is deflated.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        if let Some(mimetype) = self.get(MIMETYPE_PATH) {
            zip.start_file(MIMETYPE_PATH, stored)?;
            zip.write_all(mimetype)?;
        }

        for path in self.order.iter().filter(|p| p.as_str() != MIMETYPE_PATH) {
            zip.start_file(path.as_str(), deflated)?;
            zip.write_all(&self.files[path])?;
        }

        zip.finish()?;
        Ok(())
    }
}

/// Find `manifest:media-type` of the `/` entry in a package manifest
fn manifest_root_media_type(xml: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"manifest:file-entry" => {
                let mut full_path = None;
                let mut media_type = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.as_ref() {
                        b"manifest:full-path" => {
                            full_path = Some(attr.unescape_value()?.into_owned())
                        }
                        b"manifest:media-type" => {
                            media_type = Some(attr.unescape_value()?.into_owned())
                        }
                        _ => {}
                    }
                }
                if full_path.as_deref() == Some("/") {
                    return Ok(media_type.filter(|m| !m.is_empty()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}
