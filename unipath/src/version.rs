//! Executable version resources.
//!
//! Reading a binary's embedded version is platform- and format-specific,
//! so the crate only defines the seam: a [`VersionReader`] registered once
//! per process. Without one, every query reports the zero version, which
//! callers treat as "no version information".

use std::path::Path;
use std::sync::OnceLock;

/// Raw fixed-version words from an executable's version resource.
///
/// The four displayed components are packed two-per-word, high halves
/// first: `major.minor` in `ms`, `patch.build` in `ls`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawVersion {
    /// Most significant version word.
    pub ms: u32,
    /// Least significant version word.
    pub ls: u32,
}

/// Reads version resources out of executable files.
pub trait VersionReader: Send + Sync {
    /// Read the raw version words, or `None` when the file has no
    /// readable version resource.
    fn read_version(&self, path: &Path) -> Option<RawVersion>;
}

/// A reader that never finds a version resource.
#[derive(Debug, Default)]
pub struct NullVersionReader;

impl VersionReader for NullVersionReader {
    fn read_version(&self, _path: &Path) -> Option<RawVersion> {
        None
    }
}

static READER: OnceLock<Box<dyn VersionReader>> = OnceLock::new();

/// Register the process-wide version reader.
///
/// Only the first registration wins; returns whether this call installed
/// the reader.
pub fn set_version_reader(reader: Box<dyn VersionReader>) -> bool {
    READER.set(reader).is_ok()
}

/// The four-part version of the file at `path`.
///
/// `(0, 0, 0, 0)` when no reader is registered, the file has no version
/// resource, or the read fails.
#[must_use]
pub fn file_version(path: &Path) -> (u16, u16, u16, u16) {
    let raw = READER
        .get()
        .and_then(|reader| reader.read_version(path))
        .unwrap_or_default();
    split_words(raw)
}

/// Unpack the two version words into their four displayed components.
fn split_words(raw: RawVersion) -> (u16, u16, u16, u16) {
    (
        (raw.ms >> 16) as u16,
        (raw.ms & 0xFFFF) as u16,
        (raw.ls >> 16) as u16,
        (raw.ls & 0xFFFF) as u16,
    )
}
