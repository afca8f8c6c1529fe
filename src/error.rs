//! Error types for the studio.
//!
//! Each concern gets its own enum. Clipboard errors are always recovered
//! locally by the copy fallbacks; export, catalog and profile errors are
//! returned to the caller.

use thiserror::Error;

/// Failure of a clipboard capability or of the fallback copy command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The host does not provide the requested clipboard capability.
    #[error("clipboard capability `{0}` is not available")]
    Unsupported(&'static str),

    /// The host rejected the write (permissions, focus, ...).
    #[error("clipboard write rejected: {0}")]
    Rejected(String),

    /// The synchronous copy command of the staging fallback failed.
    #[error("copy command failed: {0}")]
    CopyCommand(String),
}

/// Failure while producing or saving an exported image.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },

    #[error("no glyph could be drawn for {0:?}")]
    BlankGlyph(String),

    #[error("glyph rendering failed for {emoji:?}: {reason}")]
    Glyph { emoji: String, reason: String },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("file save rejected for `{filename}`: {reason}")]
    Save { filename: String, reason: String },
}

/// Invalid catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate category id `{0}`")]
    DuplicateCategory(String),

    #[error("duplicate emoji id `{0}`")]
    DuplicateRecord(String),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A composer profile or studio config that cannot be applied.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("unknown face colour `{0}`")]
    UnknownColor(String),

    #[error("unknown eye style `{0}`")]
    UnknownEyes(String),

    #[error("unknown mouth style `{0}`")]
    UnknownMouth(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
