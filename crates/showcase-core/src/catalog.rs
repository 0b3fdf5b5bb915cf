#![forbid(unsafe_code)]

//! Feature catalog: the static, ordered list of records the showcase cycles
//! through.
//!
//! Order is significant. A record's position defines its index for
//! navigation and is the domain of the scroll mapping. The catalog is fixed
//! at construction and exposes no mutation.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::Path;

/// One marketing item shown by the showcase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureRecord {
    /// Unique, stable identifier.
    pub id: u32,
    /// Headline, also used as the label in the selector list.
    pub title: String,
    /// Descriptive copy.
    pub body: String,
    /// Opaque image URI.
    #[cfg_attr(feature = "serde", serde(alias = "image"))]
    pub image_ref: String,
}

impl FeatureRecord {
    /// Create a new record.
    pub fn new(
        id: u32,
        title: impl Into<String>,
        body: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            image_ref: image_ref.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while building or indexing a [`Catalog`].
#[derive(Debug)]
pub enum CatalogError {
    /// Index outside `[0, len)`. Indices are derived from the catalog itself,
    /// so this indicates a caller defect.
    OutOfRange { index: usize, len: usize },
    /// The catalog has no records.
    Empty,
    /// Two records share the same id.
    DuplicateId(u32),
    /// Catalog configuration could not be decoded.
    Parse(String),
    /// Catalog configuration could not be read.
    Io(io::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for catalog of {len} records")
            }
            CatalogError::Empty => write!(f, "catalog must contain at least one record"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate record id {id}"),
            CatalogError::Parse(msg) => write!(f, "catalog parse error: {msg}"),
            CatalogError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CatalogError {
    fn from(e: io::Error) -> Self {
        CatalogError::Io(e)
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable ordered sequence of [`FeatureRecord`]s.
///
/// A constructed catalog is never empty, so `len() - 1` is always a valid
/// index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<FeatureRecord>,
}

impl Catalog {
    /// Build a catalog, validating that it is non-empty and ids are unique.
    pub fn new(records: Vec<FeatureRecord>) -> CatalogResult<Self> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
        }
        Ok(Self { records })
    }

    /// The five stock features shipped with the showcase.
    pub fn builtin() -> Self {
        Self {
            records: vec![
                FeatureRecord::new(
                    1,
                    "Dynamic Island",
                    "Interact with notifications, music, calls, and activities seamlessly in the new Dynamic Island.",
                    "https://unblast.com/wp-content/uploads/2023/08/iPhone-14-Pro-Mockup-4.jpg",
                ),
                FeatureRecord::new(
                    2,
                    "Always-On Display",
                    "Glance at time, widgets, and notifications without waking your iPhone.",
                    "https://unblast.com/wp-content/uploads/2023/07/iPhone-14-Pro-Mockup-3.jpg",
                ),
                FeatureRecord::new(
                    3,
                    "48MP Main Camera",
                    "Capture stunning detail with the powerful 48MP camera and improved Night mode.",
                    "https://unblast.com/wp-content/uploads/2023/08/iPhone-14-Pro-Max-Mockup.jpg",
                ),
                FeatureRecord::new(
                    4,
                    "A16 Bionic Chip",
                    "Experience blazing performance and efficiency with Apple\u{2019}s fastest smartphone chip yet.",
                    "https://unblast.com/wp-content/uploads/2025/08/phone-with-cover-mockup.jpg",
                ),
                FeatureRecord::new(
                    5,
                    "Emergency SOS via Satellite",
                    "Stay safe with crash detection and satellite connectivity when you\u{2019}re off the grid.",
                    "https://unblast.com/wp-content/uploads/2025/04/Levitating-iPhone-Mockup.jpg",
                ),
            ],
        }
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a constructed catalog.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::OutOfRange`] if `index >= len()`.
    pub fn at(&self, index: usize) -> CatalogResult<&FeatureRecord> {
        self.records.get(index).ok_or(CatalogError::OutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// Index of the record with the given id.
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Iterate records in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureRecord> {
        self.records.iter()
    }

    /// Titles in catalog order.
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.title.as_str())
    }
}

impl std::ops::Index<usize> for Catalog {
    type Output = FeatureRecord;

    /// Panics on an out-of-range index; use [`Catalog::at`] for a checked read.
    fn index(&self, index: usize) -> &FeatureRecord {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FeatureRecord;
    type IntoIter = std::slice::Iter<'a, FeatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(feature = "serde")]
impl Catalog {
    /// Parse a catalog from a JSON array of records.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let records: Vec<FeatureRecord> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(records)
    }

    /// Read and parse a JSON catalog file.
    pub fn from_json_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }
}

#[cfg(not(feature = "serde"))]
impl Catalog {
    /// JSON loading requires the `serde` feature.
    pub fn from_json_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        Err(CatalogError::Parse(format!(
            "cannot load {}: built without the `serde` feature",
            path.as_ref().display()
        )))
    }
}
