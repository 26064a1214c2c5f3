//! End-to-end scanning tests over an in-memory document source
//!
//! Exercises the whole pipeline (containment, reading order, quality
//! filter, color classification, error channels) without any PDF backend.

use std::path::Path;

use marginalia::{
    Annotation, AnnotationKind, Category, DocumentSource, ExtractError, FilterOptions,
    HighlightScanner, PageError, Quad, Rect, ScanOptions, SourceDocument, Word,
};

/// One page: its annotations and its word inventory
type PageContent = (Vec<Annotation>, Vec<Word>);

struct MemorySource {
    pages: Vec<PageContent>,
}

struct MemoryDocument<'a> {
    pages: &'a [PageContent],
}

impl DocumentSource for MemorySource {
    fn open(&self, _path: &Path) -> marginalia::Result<Box<dyn SourceDocument + '_>> {
        Ok(Box::new(MemoryDocument { pages: &self.pages }))
    }
}

impl SourceDocument for MemoryDocument<'_> {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_annotations(&self, index: u32) -> Result<Vec<Annotation>, PageError> {
        Ok(self.pages[index as usize].0.clone())
    }

    fn page_words(&self, index: u32) -> Result<Vec<Word>, PageError> {
        Ok(self.pages[index as usize].1.clone())
    }
}

struct FailingSource;

impl DocumentSource for FailingSource {
    fn open(&self, path: &Path) -> marginalia::Result<Box<dyn SourceDocument + '_>> {
        Err(ExtractError::Open(format!("{}: not a pdf", path.display())))
    }
}

/// Lay out `words` left to right on one line at vertical position `y`
fn line(words: &[&str], y: f64) -> Vec<Word> {
    let mut laid_out = Vec::new();
    let mut x = 10.0;
    for word in words {
        let width = 8.0 * word.chars().count() as f64;
        laid_out.push(Word::new(*word, Rect::new(x, y, x + width, y + 12.0)));
        x += width + 6.0;
    }
    laid_out
}

/// Quad covering the given words completely, with some margin
fn covering_quad(words: &[Word]) -> Quad {
    let mut rect = words[0].rect;
    for word in &words[1..] {
        rect = rect.union(&word.rect);
    }
    Quad::from_rect(Rect::new(
        rect.x0 - 2.0,
        rect.y0 - 2.0,
        rect.x1 + 2.0,
        rect.y1 + 2.0,
    ))
}

const CYAN: [f64; 3] = [0.22, 0.9, 1.0];

#[test]
fn test_full_scan_produces_reading_order_text() {
    let words = line(
        &[
            "Implementations",
            "shall",
            "use",
            "a",
            "unique",
            "salt",
            "per",
            "credential",
        ],
        100.0,
    );
    let highlight = Annotation::highlight(
        vec![covering_quad(&words[1..6])],
        Some(CYAN.to_vec()),
    );
    let source = MemorySource {
        pages: vec![(vec![highlight], words)],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();

    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.page, 1);
    assert_eq!(record.text, "shall use a unique salt");
    assert_eq!(record.annotation_type, Some(Category::Rec));
    assert_eq!(record.color, Some(CYAN));
    assert_eq!(record.text_length, record.text.chars().count());
    assert!(record.highlight_area > 0.0);
}

#[test]
fn test_partially_covered_words_are_excluded() {
    // "use" spans x 10..34; the quad stops at x 22, covering half of it
    let words = line(&["use", "salt"], 100.0);
    let highlight = Annotation::highlight(
        vec![Quad::from_rect(Rect::new(22.0, 98.0, 70.0, 114.0))],
        Some(CYAN.to_vec()),
    );
    let source = MemorySource {
        pages: vec![(vec![highlight], words)],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].text, "salt");
}

#[test]
fn test_exact_sixty_percent_coverage_is_included() {
    // word area 100 x 12, quad covers exactly 60 x 12
    let word = Word::new("borderline", Rect::new(0.0, 0.0, 100.0, 12.0));
    let highlight = Annotation::highlight(
        vec![Quad::from_rect(Rect::new(0.0, 0.0, 60.0, 12.0))],
        Some(CYAN.to_vec()),
    );
    let source = MemorySource {
        pages: vec![(vec![highlight], vec![word])],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].text, "borderline");
}

#[test]
fn test_multi_line_highlight_joins_quads_in_order() {
    // second line sits lower on the page but its quad comes first
    let mut words = line(&["first", "line"], 200.0);
    let lower = line(&["second", "line"], 180.0);
    let quad_upper = covering_quad(&words);
    let quad_lower = covering_quad(&lower);
    words.extend(lower);

    let highlight = Annotation::highlight(vec![quad_upper, quad_lower], Some(CYAN.to_vec()));
    let source = MemorySource {
        pages: vec![(vec![highlight], words)],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].text, "first line second line");
}

#[test]
fn test_records_follow_document_order() {
    let page_one = line(&["alpha", "clause"], 100.0);
    let page_three = line(&["gamma", "clause"], 100.0);
    let first = Annotation::highlight(
        vec![covering_quad(&page_one[..1])],
        Some(CYAN.to_vec()),
    );
    let second = Annotation::highlight(
        vec![covering_quad(&page_one[1..])],
        Some([1.0, 0.76, 0.0].to_vec()),
    );
    let third = Annotation::highlight(vec![covering_quad(&page_three)], Some(CYAN.to_vec()));

    let source = MemorySource {
        pages: vec![
            (vec![first, second], page_one),
            (vec![], line(&["no", "marks", "here"], 100.0)),
            (vec![third], page_three),
        ],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();

    let pages: Vec<u32> = outcome.records.iter().map(|r| r.page).collect();
    assert_eq!(pages, vec![1, 1, 3]);
    assert_eq!(outcome.records[0].text, "alpha");
    assert_eq!(outcome.records[1].text, "clause");
    assert_eq!(outcome.records[1].annotation_type, Some(Category::Fyi));
    assert_eq!(outcome.records[2].text, "gamma clause");
}

#[test]
fn test_unknown_color_yields_no_category() {
    let words = line(&["unmapped", "color"], 100.0);
    let highlight = Annotation::highlight(
        vec![covering_quad(&words)],
        Some(vec![0.5, 0.5, 0.5]),
    );
    let source = MemorySource {
        pages: vec![(vec![highlight], words)],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].annotation_type, None);
    assert_eq!(outcome.records[0].color, Some([0.5, 0.5, 0.5]));
}

#[test]
fn test_grayscale_color_is_broadcast() {
    let words = line(&["gray", "mark"], 100.0);
    let highlight = Annotation::highlight(vec![covering_quad(&words)], Some(vec![0.9]));
    let source = MemorySource {
        pages: vec![(vec![highlight], words)],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();

    assert_eq!(outcome.records[0].color, Some([0.9, 0.9, 0.9]));
    assert_eq!(outcome.records[0].annotation_type, None);
}

#[test]
fn test_low_quality_highlights_produce_no_records() {
    let words = {
        let mut w = line(&["www.example.com"], 100.0);
        w.extend(line(&["1234"], 80.0));
        w.extend(line(&["useful", "prose"], 60.0));
        w
    };
    let over_url = Annotation::highlight(vec![covering_quad(&words[..1])], Some(CYAN.to_vec()));
    let over_digits =
        Annotation::highlight(vec![covering_quad(&words[1..2])], Some(CYAN.to_vec()));
    let over_prose =
        Annotation::highlight(vec![covering_quad(&words[2..])], Some(CYAN.to_vec()));

    let source = MemorySource {
        pages: vec![(vec![over_url, over_digits, over_prose], words)],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].text, "useful prose");
    assert!(!outcome.is_partial());
}

#[test]
fn test_custom_filter_options_tighten_the_gate() {
    let words = line(&["oak"], 100.0);
    let highlight = Annotation::highlight(vec![covering_quad(&words)], Some(CYAN.to_vec()));
    let pages = vec![(vec![highlight], words)];

    let default_scan = HighlightScanner::new(MemorySource {
        pages: pages.clone(),
    })
    .scan_file("memory.pdf")
    .unwrap();
    assert_eq!(default_scan.records.len(), 1);

    let options = ScanOptions {
        filter: FilterOptions {
            min_trimmed_len: 5,
            ..Default::default()
        },
        ..Default::default()
    };
    let strict_scan = HighlightScanner::with_options(MemorySource { pages }, options)
        .scan_file("memory.pdf")
        .unwrap();
    assert!(strict_scan.records.is_empty());
}

#[test]
fn test_scan_is_deterministic() {
    let words = line(&["shall", "use", "a", "salt"], 100.0);
    let highlight = Annotation::highlight(vec![covering_quad(&words)], Some(CYAN.to_vec()));
    let source = MemorySource {
        pages: vec![(vec![highlight], words)],
    };
    let scanner = HighlightScanner::new(source);

    let first = scanner.scan_file("memory.pdf").unwrap();
    let second = scanner.scan_file("memory.pdf").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_open_failure_is_soft_in_extract_highlights() {
    let scanner = HighlightScanner::new(FailingSource);
    assert!(scanner.extract_highlights("/tmp/broken.pdf").is_empty());
}

#[test]
fn test_open_failure_is_hard_in_scan_file() {
    let scanner = HighlightScanner::new(FailingSource);
    let err = scanner.scan_file("/tmp/broken.pdf").unwrap_err();
    assert!(matches!(err, ExtractError::Open(_)));
    assert!(err.to_string().contains("/tmp/broken.pdf"));
}

#[test]
fn test_other_annotation_kinds_never_resolve() {
    let words = line(&["keep", "out"], 100.0);
    let square = Annotation {
        kind: AnnotationKind::Other,
        quads: vec![covering_quad(&words)],
        color: Some(CYAN.to_vec()),
    };
    let source = MemorySource {
        pages: vec![(vec![square], words)],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();
    assert!(outcome.records.is_empty());
}

#[test]
fn test_color_stats_count_in_first_appearance_order() {
    let words = line(&["a1", "b2", "c3"], 100.0);
    let annotations = vec![
        Annotation::highlight(vec![covering_quad(&words[..1])], Some(CYAN.to_vec())),
        Annotation::highlight(
            vec![covering_quad(&words[1..2])],
            Some([1.0, 0.76, 0.0].to_vec()),
        ),
        Annotation::highlight(vec![covering_quad(&words[2..])], Some(CYAN.to_vec())),
        Annotation::highlight(vec![], None),
    ];
    let source = MemorySource {
        pages: vec![(annotations, words)],
    };

    let stats = HighlightScanner::new(source)
        .color_stats("memory.pdf")
        .unwrap();
    assert_eq!(stats, vec![(CYAN, 2), ([1.0, 0.76, 0.0], 1)]);
}

#[cfg(feature = "serde")]
#[test]
fn test_record_serializes_with_reporting_fields() {
    let words = line(&["shall", "use", "a", "salt"], 100.0);
    let highlight = Annotation::highlight(vec![covering_quad(&words)], Some(CYAN.to_vec()));
    let source = MemorySource {
        pages: vec![(vec![highlight], words)],
    };

    let outcome = HighlightScanner::new(source)
        .scan_file("memory.pdf")
        .unwrap();
    let value = serde_json::to_value(&outcome.records[0]).unwrap();

    assert_eq!(value["page"], 1);
    assert_eq!(value["text"], "shall use a salt");
    assert_eq!(value["annotation_type"], "Rec");
    assert!(value["coordinates"]["x0"].is_number());
    assert!(value["highlight_area"].is_number());
    assert_eq!(value["text_length"], 16);
}
