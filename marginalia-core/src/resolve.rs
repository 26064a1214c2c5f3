//! Highlight-to-text resolution
//!
//! The geometric heart of the crate: given a highlight's quads and the
//! page's word inventory, decide which words the highlight covers and
//! stitch them back into the highlighted sentence fragment.
//!
//! Containment is asymmetric on purpose. A word counts as highlighted when
//! the intersection of its bounding box with the quad's bounding rectangle
//! covers at least [`CONTAINMENT_THRESHOLD`] of the word's own area. Large
//! words astride a highlight edge are included only when most of the word
//! is covered, while imprecise highlight boundaries still pick up the words
//! they meant to.
//!
//! # Usage
//!
//! ```rust
//! use marginalia::geometry::{Quad, Rect};
//! use marginalia::model::{Annotation, Word};
//! use marginalia::resolve::{resolve_highlight, CONTAINMENT_THRESHOLD};
//!
//! let words = vec![
//!     Word::new("shall", Rect::new(0.0, 0.0, 30.0, 10.0)),
//!     Word::new("use", Rect::new(35.0, 0.0, 55.0, 10.0)),
//! ];
//! let annotation = Annotation::highlight(
//!     vec![Quad::from_rect(Rect::new(0.0, 0.0, 60.0, 10.0))],
//!     None,
//! );
//! let text = resolve_highlight(&annotation, &words, CONTAINMENT_THRESHOLD);
//! assert_eq!(text, "shall use");
//! ```

use crate::geometry::Rect;
use crate::model::{Annotation, Word};

/// Minimum fraction of a word's area that must overlap a quad's bounding
/// rectangle for the word to count as highlighted
pub const CONTAINMENT_THRESHOLD: f64 = 0.6;

/// Check whether a word rectangle is contained in a highlight strip
///
/// The threshold comparison is inclusive: an overlap of exactly
/// `threshold` times the word's area counts as contained.
pub fn word_contained(word_rect: &Rect, strip_rect: &Rect, threshold: f64) -> bool {
    let overlap = word_rect
        .intersection(strip_rect)
        .map(|r| r.area())
        .unwrap_or(0.0);
    overlap >= word_rect.area() * threshold
}

/// Reconstruct the text covered by a highlight annotation
///
/// Words are tested against each quad independently. Within a quad, the
/// contained words keep the order of the page inventory (reading order for
/// normal text flow); the resolver never re-sorts them. Per-quad fragments
/// are then joined with a single space in quad order, empty fragments
/// included, mirroring the order the highlight strips were stored in.
///
/// Returns an empty string when no quad contains any word.
pub fn resolve_highlight(annotation: &Annotation, page_words: &[Word], threshold: f64) -> String {
    let fragments: Vec<String> = annotation
        .quads
        .iter()
        .map(|quad| {
            let strip = quad.bounding_rect();
            page_words
                .iter()
                .filter(|word| word_contained(&word.rect, &strip, threshold))
                .map(|word| word.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    fragments.join(" ")
}

/// Collapse whitespace runs in resolved text
///
/// Runs of spaces and tabs become one space, then runs of newlines become
/// one space, then the ends are trimmed. Applied after the quality filter,
/// before the record is built.
pub fn clean_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_blank = false;
    for ch in text.chars() {
        match ch {
            ' ' | '\t' => {
                if !in_blank {
                    collapsed.push(' ');
                }
                in_blank = true;
            }
            _ => {
                collapsed.push(ch);
                in_blank = false;
            }
        }
    }

    let mut cleaned = String::with_capacity(collapsed.len());
    let mut in_newlines = false;
    for ch in collapsed.chars() {
        match ch {
            '\n' => {
                if !in_newlines {
                    cleaned.push(' ');
                }
                in_newlines = true;
            }
            _ => {
                cleaned.push(ch);
                in_newlines = false;
            }
        }
    }

    cleaned.trim().to_string()
}
