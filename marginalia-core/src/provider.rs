//! Collaborator contract for PDF access
//!
//! The scanner never talks to a PDF library directly. It consumes these
//! narrow traits, which any backend (or an in-memory fake in tests) can
//! implement. The crate's own `pdfium` module provides a production
//! implementation behind the `pdfium` feature.
//!
//! Page-level accessors fail through [`PageError`] so the scanner can skip
//! the page and continue; opening fails through the fatal channel.

use std::path::Path;

use crate::error::{PageError, Result};
use crate::model::{Annotation, Word};

/// An open document exposing annotation geometry and word layout per page
///
/// Implementations release any underlying handle when dropped, which is the
/// scanner's guarantee that the document is closed on every exit path.
pub trait SourceDocument {
    /// Number of pages in the document
    fn page_count(&self) -> u32;

    /// Annotations on the page at `index` (0-based), in storage order
    fn page_annotations(&self, index: u32) -> std::result::Result<Vec<Annotation>, PageError>;

    /// Word inventory of the page at `index` (0-based), in reading order
    fn page_words(&self, index: u32) -> std::result::Result<Vec<Word>, PageError>;
}

/// A backend that can open documents from the filesystem
pub trait DocumentSource {
    /// Open the document at `path`
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Open`](crate::error::ExtractError::Open) when
    /// the file is missing or not a readable document.
    fn open(&self, path: &Path) -> Result<Box<dyn SourceDocument + '_>>;
}
