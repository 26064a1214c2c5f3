//! Data model for words, annotations and extracted highlight records

use crate::geometry::{Quad, Rect};
use crate::legend::Category;

/// A single lexical token on a page, with its bounding box
///
/// Produced by the text layout provider in reading order. Immutable and
/// scoped to one page.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// Token text, free of surrounding whitespace
    pub text: String,
    /// Bounding box in page space
    pub rect: Rect,
}

impl Word {
    /// Create a new word
    pub fn new(text: impl Into<String>, rect: Rect) -> Self {
        Self {
            text: text.into(),
            rect,
        }
    }
}

/// PDF annotation subtype, reduced to what the scanner distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    /// A text highlight
    Highlight,
    /// Any other annotation subtype, ignored by the scanner
    Other,
}

/// A markup annotation on a page, as supplied by the PDF layer
///
/// Highlights carry one quad per visual strip (one per text line for a
/// multi-line highlight), in the order they appear in the annotation's
/// vertex list. The color keeps the raw channel list from the PDF color
/// array: 0, 1, 3 or 4 components depending on the color space.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Annotation subtype
    pub kind: AnnotationKind,
    /// Quadrilateral strips composing the mark
    pub quads: Vec<Quad>,
    /// Raw color channels, stroke preferred over fill; `None` when absent
    pub color: Option<Vec<f64>>,
}

impl Annotation {
    /// Create a highlight annotation
    pub fn highlight(quads: Vec<Quad>, color: Option<Vec<f64>>) -> Self {
        Self {
            kind: AnnotationKind::Highlight,
            quads,
            color,
        }
    }

    /// Overall bounding rectangle, the union of all quad rectangles
    ///
    /// `None` when the annotation has no quads.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut quads = self.quads.iter();
        let first = quads.next()?.bounding_rect();
        Some(quads.fold(first, |acc, quad| acc.union(&quad.bounding_rect())))
    }
}

/// Bounding-box coordinates of a highlight, in page space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    /// Left edge
    pub x0: f64,
    /// First vertical edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Second vertical edge
    pub y1: f64,
}

impl From<Rect> for Coordinates {
    fn from(rect: Rect) -> Self {
        Self {
            x0: rect.x0,
            y0: rect.y0,
            x1: rect.x1,
            y1: rect.y1,
        }
    }
}

/// One resolved, classified highlight
///
/// Created once per qualifying annotation and never mutated. The text is
/// guaranteed non-empty and has passed the quality filter; annotations
/// resolving to empty or low-quality text produce no record at all.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightRecord {
    /// 1-based page number
    pub page: u32,
    /// Extracted highlighted text
    pub text: String,
    /// Normalized color, `None` when the annotation carried no color
    pub color: Option<[f64; 3]>,
    /// Legend category, `None` when the color matched no legend entry
    pub annotation_type: Option<Category>,
    /// Bounding box of the whole highlight
    pub coordinates: Coordinates,
    /// Area of the bounding box
    pub highlight_area: f64,
    /// Length of the extracted text in characters
    pub text_length: usize,
}
