//! # marginalia
//!
//! Extract and classify colored highlight annotations from PDF documents.
//!
//! ## Features
//!
//! - **Highlight Extraction**: Recover the text covered by highlight
//!   annotations from word and quad geometry, in reading order
//! - **Color Classification**: Map raw annotation colors onto a fixed legend
//!   of review categories, with tolerance for renderer color drift
//! - **Quality Filtering**: Drop URLs, page artifacts and other fragments
//!   that are not prose
//! - **Resilient Scanning**: A broken page is logged and skipped, never
//!   fatal; only an unopenable document fails a scan
//! - **Pluggable PDF Layer**: The backend sits behind two narrow traits; a
//!   pdfium-backed implementation ships behind the `pdfium` feature
//!
//! ## Quick Start
//!
//! The core pipeline works on plain geometry and needs no PDF backend:
//!
//! ```rust
//! use marginalia::{
//!     classify_color, resolve_highlight, Annotation, Category, Quad, Rect, Word,
//!     CONTAINMENT_THRESHOLD,
//! };
//!
//! // One word on a page, fully covered by a highlight strip
//! let words = vec![Word::new("salt", Rect::new(10.0, 10.0, 50.0, 22.0))];
//! let highlight = Annotation::highlight(
//!     vec![Quad::from_rect(Rect::new(8.0, 8.0, 52.0, 24.0))],
//!     Some(vec![0.22, 0.9, 1.0]),
//! );
//!
//! let text = resolve_highlight(&highlight, &words, CONTAINMENT_THRESHOLD);
//! assert_eq!(text, "salt");
//!
//! let category = highlight.color.as_deref().and_then(classify_color);
//! assert_eq!(category, Some(Category::Rec));
//! ```
//!
//! Scanning a real file goes through [`scan::HighlightScanner`] with a
//! [`provider::DocumentSource`], typically the pdfium one; the [`scan`]
//! module docs show the end-to-end example.
//!
//! ## Modules
//!
//! - [`scan`] - Document scanning and record assembly
//! - [`resolve`] - Geometric word-in-quad text resolution
//! - [`legend`] - Color legend and classification
//! - [`filter`] - Text quality filtering
//! - [`model`] - Words, annotations and extracted records
//! - [`geometry`] - Points, rectangles and quads
//! - [`provider`] - PDF backend traits
//! - [`error`] - Document-level and page-level error types

pub mod error;
pub mod filter;
pub mod geometry;
pub mod legend;
pub mod model;
pub mod provider;
pub mod resolve;
pub mod scan;

#[cfg(feature = "pdfium")]
pub mod pdfium;

// Re-export the pipeline types
pub use error::{ExtractError, PageError, Result};
pub use filter::{is_quality_text, FilterOptions};
pub use geometry::{Point, Quad, Rect};
pub use legend::{classify_color, normalize_color, Category, COLOR_TOLERANCE, LEGEND};
pub use model::{Annotation, AnnotationKind, Coordinates, HighlightRecord, Word};
pub use provider::{DocumentSource, SourceDocument};
pub use resolve::{clean_whitespace, resolve_highlight, word_contained, CONTAINMENT_THRESHOLD};
pub use scan::{HighlightScanner, ScanOptions, ScanOutcome};

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumSource;

/// Current version of marginalia
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
