//! Error types for highlight extraction
//!
//! Two channels exist on purpose. [`ExtractError`] is fatal to a whole
//! extraction call (the document never became readable). [`PageError`] is
//! recovered: the offending page is skipped, the error is logged and
//! collected into the scan outcome, and the scan continues. Callers can
//! therefore tell partial success apart from total failure.

use thiserror::Error;

/// Errors that abort an extraction call
#[derive(Error, Debug)]
pub enum ExtractError {
    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be opened (missing file, corrupt data)
    #[error("failed to open document: {0}")]
    Open(String),

    /// The PDF backend could not be initialized
    #[error("PDF backend unavailable: {0}")]
    Backend(String),
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// A failure confined to one page, recovered by skipping the page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// Annotation data on the page could not be read
    #[error("page {page}: failed to read annotations: {reason}")]
    Annotations {
        /// 1-based page number
        page: u32,
        /// Backend-supplied failure description
        reason: String,
    },

    /// The page's word inventory could not be read
    #[error("page {page}: failed to read text: {reason}")]
    Text {
        /// 1-based page number
        page: u32,
        /// Backend-supplied failure description
        reason: String,
    },
}

impl PageError {
    /// 1-based number of the page that was skipped
    pub fn page_number(&self) -> u32 {
        match self {
            PageError::Annotations { page, .. } => *page,
            PageError::Text { page, .. } => *page,
        }
    }
}
