//! Document scanning and orchestration
//!
//! [`HighlightScanner`] walks an opened document page by page, keeps the
//! highlight annotations, and runs each through the resolve, filter and
//! classify pipeline. Pages are processed strictly sequentially; the only
//! shared resource is the open document handle, owned for the duration of
//! one call and released on every exit path.
//!
//! Failures follow the two-channel design from [`crate::error`]: a document
//! that cannot be opened fails the whole call, a page that cannot be read
//! is logged, recorded in the [`ScanOutcome`] and skipped.

use std::path::Path;

use tracing::{debug, error, warn};

use crate::error::{PageError, Result};
use crate::filter::{is_quality_text, FilterOptions};
use crate::legend::{classify_color, normalize_color};
use crate::model::{Annotation, AnnotationKind, HighlightRecord, Word};
use crate::provider::{DocumentSource, SourceDocument};
use crate::resolve::{clean_whitespace, resolve_highlight, CONTAINMENT_THRESHOLD};

/// Tuning knobs for a scan
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    /// Minimum word/quad overlap fraction, see
    /// [`CONTAINMENT_THRESHOLD`](crate::resolve::CONTAINMENT_THRESHOLD)
    pub containment_threshold: f64,
    /// Quality filter configuration
    pub filter: FilterOptions,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            containment_threshold: CONTAINMENT_THRESHOLD,
            filter: FilterOptions::default(),
        }
    }
}

/// Result of scanning one document
///
/// `records` is ordered: page ascending, annotation encounter order within
/// a page. `page_errors` carries the recovered per-page failures, so a
/// caller can tell a full scan from a partial one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanOutcome {
    /// Extracted highlight records, in document order
    pub records: Vec<HighlightRecord>,
    /// Pages that had to be skipped
    pub page_errors: Vec<PageError>,
}

impl ScanOutcome {
    /// True when at least one page was skipped
    pub fn is_partial(&self) -> bool {
        !self.page_errors.is_empty()
    }
}

/// Extracts classified highlight records from documents
///
/// # Examples
///
/// ```rust,no_run
/// # #[cfg(feature = "pdfium")]
/// # fn demo() -> marginalia::Result<()> {
/// use marginalia::pdfium::PdfiumSource;
/// use marginalia::scan::HighlightScanner;
///
/// let scanner = HighlightScanner::new(PdfiumSource::new()?);
/// let outcome = scanner.scan_file("reviewed.pdf")?;
/// for record in &outcome.records {
///     println!("page {}: {}", record.page, record.text);
/// }
/// # Ok(())
/// # }
/// ```
pub struct HighlightScanner<S> {
    source: S,
    options: ScanOptions,
}

impl<S: DocumentSource> HighlightScanner<S> {
    /// Create a scanner with default options
    pub fn new(source: S) -> Self {
        Self::with_options(source, ScanOptions::default())
    }

    /// Create a scanner with custom options
    pub fn with_options(source: S, options: ScanOptions) -> Self {
        Self { source, options }
    }

    /// The options this scanner runs with
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan the document at `path`
    ///
    /// # Errors
    ///
    /// Fails only when the document cannot be opened. Page-level failures
    /// are recovered and reported through the returned outcome instead.
    pub fn scan_file(&self, path: impl AsRef<Path>) -> Result<ScanOutcome> {
        let document = self.source.open(path.as_ref())?;
        Ok(self.scan_document(document.as_ref()))
    }

    /// Scan the document at `path`, absorbing open failures
    ///
    /// The soft-fail entry point: an unopenable document logs an error and
    /// yields an empty record list, favoring partial results over total
    /// failure. Use [`scan_file`](Self::scan_file) when the caller needs to
    /// see the failure.
    pub fn extract_highlights(&self, path: impl AsRef<Path>) -> Vec<HighlightRecord> {
        let path = path.as_ref();
        match self.scan_file(path) {
            Ok(outcome) => outcome.records,
            Err(err) => {
                error!("skipping {}: {err}", path.display());
                Vec::new()
            }
        }
    }

    /// Scan an already opened document
    pub fn scan_document(&self, document: &dyn SourceDocument) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for index in 0..document.page_count() {
            let annotations = match document.page_annotations(index) {
                Ok(annotations) => annotations,
                Err(err) => {
                    warn!("{err}");
                    outcome.page_errors.push(err);
                    continue;
                }
            };

            let highlights: Vec<&Annotation> = annotations
                .iter()
                .filter(|a| a.kind == AnnotationKind::Highlight)
                .collect();
            if highlights.is_empty() {
                continue;
            }

            let words = match document.page_words(index) {
                Ok(words) => words,
                Err(err) => {
                    warn!("{err}");
                    outcome.page_errors.push(err);
                    continue;
                }
            };

            let page_number = index + 1;
            for annotation in highlights {
                if let Some(record) = self.process_annotation(page_number, annotation, &words) {
                    outcome.records.push(record);
                }
            }
        }

        debug!(
            "scan finished: {} records, {} skipped pages",
            outcome.records.len(),
            outcome.page_errors.len()
        );
        outcome
    }

    /// Count normalized highlight colors in the document at `path`
    ///
    /// Colors are keyed by first appearance; annotations without a color
    /// are not counted. Shares the open-failure channel with
    /// [`scan_file`](Self::scan_file); unreadable pages are skipped.
    pub fn color_stats(&self, path: impl AsRef<Path>) -> Result<Vec<([f64; 3], usize)>> {
        let document = self.source.open(path.as_ref())?;
        let mut stats: Vec<([f64; 3], usize)> = Vec::new();

        for index in 0..document.page_count() {
            let annotations = match document.page_annotations(index) {
                Ok(annotations) => annotations,
                Err(err) => {
                    warn!("{err}");
                    continue;
                }
            };
            for annotation in annotations {
                if annotation.kind != AnnotationKind::Highlight {
                    continue;
                }
                let Some(channels) = &annotation.color else {
                    continue;
                };
                let color = normalize_color(channels);
                match stats.iter_mut().find(|(c, _)| *c == color) {
                    Some((_, count)) => *count += 1,
                    None => stats.push((color, 1)),
                }
            }
        }

        Ok(stats)
    }

    fn process_annotation(
        &self,
        page: u32,
        annotation: &Annotation,
        words: &[Word],
    ) -> Option<HighlightRecord> {
        let raw = resolve_highlight(annotation, words, self.options.containment_threshold);
        if raw.is_empty() || !is_quality_text(&raw, &self.options.filter) {
            return None;
        }

        let text = clean_whitespace(&raw);
        if text.is_empty() {
            return None;
        }

        let rect = annotation.bounding_rect()?;
        let color = annotation.color.as_deref().map(normalize_color);
        let annotation_type = annotation.color.as_deref().and_then(classify_color);
        let text_length = text.chars().count();

        Some(HighlightRecord {
            page,
            text,
            color,
            annotation_type,
            coordinates: rect.into(),
            highlight_area: rect.area(),
            text_length,
        })
    }
}
