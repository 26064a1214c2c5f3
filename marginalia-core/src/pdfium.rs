//! pdfium-backed document source
//!
//! Production implementation of the provider traits on top of the
//! `pdfium-render` crate. Requires the `pdfium` feature at build time and a
//! pdfium dynamic library at runtime; [`PdfiumSource::new`] looks for one
//! in the working directory, then system-wide.
//!
//! The word inventory is reconstructed from character boxes: characters are
//! grouped into lines by vertical proximity, ordered left to right, and
//! split into words at whitespace gaps wider than a fraction of the average
//! character width.

use std::cmp::Ordering;
use std::path::Path;

use pdfium_render::prelude::*;

use crate::error::{ExtractError, PageError, Result};
use crate::geometry::{Point, Quad, Rect};
use crate::model::{Annotation, AnnotationKind, Word};
use crate::provider::{DocumentSource, SourceDocument};

/// Fraction of the average character width that separates two words
const WORD_GAP_RATIO: f64 = 0.3;

/// Fraction of a character height used as same-line tolerance
const LINE_TOLERANCE_RATIO: f64 = 0.4;

/// Document source backed by a pdfium library
pub struct PdfiumSource {
    pdfium: Pdfium,
}

impl PdfiumSource {
    /// Bind to a pdfium library
    ///
    /// Looks for the platform library name in the working directory first,
    /// then falls back to the system library path.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Backend`] when no pdfium library can be
    /// loaded.
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| ExtractError::Backend(e.to_string()))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl DocumentSource for PdfiumSource {
    fn open(&self, path: &Path) -> Result<Box<dyn SourceDocument + '_>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ExtractError::Open(format!("{}: {e}", path.display())))?;
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl SourceDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> u32 {
        self.document.pages().len() as u32
    }

    fn page_annotations(&self, index: u32) -> std::result::Result<Vec<Annotation>, PageError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| PageError::Annotations {
                page: index + 1,
                reason: e.to_string(),
            })?;

        let mut annotations = Vec::new();
        for annotation in page.annotations().iter() {
            if !matches!(
                annotation.annotation_type(),
                PdfPageAnnotationType::Highlight
            ) {
                annotations.push(Annotation {
                    kind: AnnotationKind::Other,
                    quads: Vec::new(),
                    color: None,
                });
                continue;
            }

            let mut quads: Vec<Quad> = annotation
                .attachment_points()
                .iter()
                .map(|points| quad_from_points(&points))
                .collect();
            if quads.is_empty() {
                // highlights written without quad points still have a rect
                if let Ok(bounds) = annotation.bounds() {
                    quads.push(Quad::from_rect(rect_from_pdf(&bounds)));
                }
            }

            annotations.push(Annotation {
                kind: AnnotationKind::Highlight,
                quads,
                color: annotation_color(&annotation),
            });
        }
        Ok(annotations)
    }

    fn page_words(&self, index: u32) -> std::result::Result<Vec<Word>, PageError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| PageError::Text {
                page: index + 1,
                reason: e.to_string(),
            })?;
        let text = page.text().map_err(|e| PageError::Text {
            page: index + 1,
            reason: e.to_string(),
        })?;

        let mut chars = Vec::new();
        for ch in text.chars().iter() {
            if let (Some(unicode), Ok(bounds)) = (ch.unicode_char(), ch.tight_bounds()) {
                chars.push(CharBox {
                    ch: unicode,
                    rect: rect_from_pdf(&bounds),
                });
            }
        }
        Ok(group_into_words(chars))
    }
}

/// One printable character with its bounding box
#[derive(Debug, Clone)]
struct CharBox {
    ch: char,
    rect: Rect,
}

fn rect_from_pdf(rect: &PdfRect) -> Rect {
    Rect::new(
        rect.left().value as f64,
        rect.bottom().value as f64,
        rect.right().value as f64,
        rect.top().value as f64,
    )
}

fn quad_from_points(points: &PdfQuadPoints) -> Quad {
    Quad::new([
        Point::new(points.x1.value as f64, points.y1.value as f64),
        Point::new(points.x2.value as f64, points.y2.value as f64),
        Point::new(points.x3.value as f64, points.y3.value as f64),
        Point::new(points.x4.value as f64, points.y4.value as f64),
    ])
}

fn annotation_color(annotation: &PdfPageAnnotation) -> Option<Vec<f64>> {
    let direct = annotation
        .stroke_color()
        .ok()
        .or_else(|| annotation.fill_color().ok());
    // pdfium stops reporting the color entry once an appearance stream
    // exists; the appearance objects carry the color instead
    let color = direct.or_else(|| {
        annotation
            .objects()
            .iter()
            .find_map(|object| object.fill_color().ok())
    });
    color.map(|c| {
        vec![
            c.red() as f64 / 255.0,
            c.green() as f64 / 255.0,
            c.blue() as f64 / 255.0,
        ]
    })
}

/// Group character boxes into words in reading order
///
/// Lines are formed by vertical proximity (top of page first), characters
/// within a line run left to right, and a horizontal gap wider than
/// [`WORD_GAP_RATIO`] of the average character width starts a new word.
fn group_into_words(chars: Vec<CharBox>) -> Vec<Word> {
    let mut printable: Vec<CharBox> = chars.into_iter().filter(|c| !c.ch.is_whitespace()).collect();
    if printable.is_empty() {
        return Vec::new();
    }

    let avg_width =
        printable.iter().map(|c| c.rect.width()).sum::<f64>() / printable.len() as f64;
    let space_threshold = avg_width * WORD_GAP_RATIO;

    // page space grows upward, so larger y means higher on the page
    printable.sort_by(|a, b| {
        b.rect
            .y0
            .partial_cmp(&a.rect.y0)
            .unwrap_or(Ordering::Equal)
    });
    let line_tolerance = printable[0].rect.height() * LINE_TOLERANCE_RATIO;

    let mut lines: Vec<Vec<CharBox>> = Vec::new();
    for ch in printable {
        match lines.last_mut() {
            Some(line) if (line[0].rect.y0 - ch.rect.y0).abs() <= line_tolerance => {
                line.push(ch);
            }
            _ => lines.push(vec![ch]),
        }
    }

    let mut words = Vec::new();
    for mut line in lines {
        line.sort_by(|a, b| {
            a.rect
                .x0
                .partial_cmp(&b.rect.x0)
                .unwrap_or(Ordering::Equal)
        });

        let mut current: Option<(String, Rect)> = None;
        for ch in line {
            current = match current {
                Some((mut text, rect)) if ch.rect.x0 - rect.x1 <= space_threshold => {
                    text.push(ch.ch);
                    Some((text, rect.union(&ch.rect)))
                }
                Some((text, rect)) => {
                    words.push(Word::new(text, rect));
                    Some((ch.ch.to_string(), ch.rect))
                }
                None => Some((ch.ch.to_string(), ch.rect)),
            };
        }
        if let Some((text, rect)) = current {
            words.push(Word::new(text, rect));
        }
    }
    words
}
