//! Highlight color legend and classification
//!
//! Reviewers mark documents with a fixed palette where each color means one
//! annotation category. This module owns the palette (canonical colors plus
//! the variants observed in real renderings) and maps raw annotation colors
//! onto [`Category`] values.
//!
//! The legend is an ordered slice, never a map: fuzzy matching scans it
//! front to back and the first entry within tolerance wins, so results do
//! not depend on any hash iteration order.
//!
//! # Usage
//!
//! ```rust
//! use marginalia::legend::{classify_color, normalize_color, Category};
//!
//! assert_eq!(classify_color(&[0.22, 0.9, 1.0]), Some(Category::Rec));
//! assert_eq!(classify_color(&[0.5, 0.5, 0.5]), None);
//! assert_eq!(normalize_color(&[0.5]), [0.5, 0.5, 0.5]);
//! ```

use std::fmt;

/// Annotation category assigned to a highlight color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Definition of a term
    Def,
    /// Other important information
    #[cfg_attr(feature = "serde", serde(rename = "FYI"))]
    Fyi,
    /// Recommendation
    Rec,
    /// Error in the source document
    Err,
    /// Reference to an external resource
    Ref,
}

impl Category {
    /// All categories, in reporting order
    pub const ALL: [Category; 5] = [
        Category::Def,
        Category::Fyi,
        Category::Rec,
        Category::Err,
        Category::Ref,
    ];

    /// Short code used in records and exports
    pub fn code(&self) -> &'static str {
        match self {
            Category::Def => "Def",
            Category::Fyi => "FYI",
            Category::Rec => "Rec",
            Category::Err => "Err",
            Category::Ref => "Ref",
        }
    }

    /// Human-readable legend label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Def => "Definition",
            Category::Fyi => "Other important info",
            Category::Rec => "Recommendation",
            Category::Err => "Error",
            Category::Ref => "Reference to external resource",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Per-channel tolerance for fuzzy legend matching
pub const COLOR_TOLERANCE: f64 = 0.15;

/// Ordered color legend: canonical colors first, observed rendering
/// variants after. Fuzzy matching scans this order, first match wins.
pub const LEGEND: &[([f64; 3], Category)] = &[
    ([1.0, 0.76, 0.0], Category::Fyi),
    ([0.77, 0.98, 0.45], Category::Def),
    ([0.22, 0.9, 1.0], Category::Rec),
    ([1.0, 0.38, 0.0], Category::Err),
    ([0.86, 0.67, 1.0], Category::Ref),
    ([1.0, 0.75, 0.0], Category::Fyi),
    ([1.0, 0.77, 0.0], Category::Fyi),
    ([0.97, 0.39, 0.39], Category::Err),
    ([0.76, 0.98, 0.45], Category::Def),
    ([0.78, 0.98, 0.45], Category::Def),
    ([0.21, 0.9, 1.0], Category::Rec),
    ([0.23, 0.9, 1.0], Category::Rec),
    ([0.96, 0.39, 0.39], Category::Err),
    ([0.98, 0.39, 0.39], Category::Err),
    ([0.85, 0.67, 1.0], Category::Ref),
    ([0.87, 0.67, 1.0], Category::Ref),
];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalize raw color channels to exactly three values rounded to two
/// decimal places
///
/// PDF annotation colors arrive with 0, 1, 3 or 4 components. Three or more
/// components keep the first three; a single component (grayscale) is
/// broadcast to all three channels; anything else collapses to black.
pub fn normalize_color(channels: &[f64]) -> [f64; 3] {
    match channels {
        [] => [0.0, 0.0, 0.0],
        [gray] => {
            let v = round2(*gray);
            [v, v, v]
        }
        [r, g, b, ..] => [round2(*r), round2(*g), round2(*b)],
        _ => [0.0, 0.0, 0.0],
    }
}

/// Map raw color channels to a legend category
///
/// The color is normalized, looked up exactly, then fuzzily: the first
/// legend entry whose every channel is within [`COLOR_TOLERANCE`]
/// (inclusive) of the normalized color wins. `None` means the color is not
/// part of the legend; it is never an error.
pub fn classify_color(channels: &[f64]) -> Option<Category> {
    let color = normalize_color(channels);

    for (legend_color, category) in LEGEND {
        if *legend_color == color {
            return Some(*category);
        }
    }

    for (legend_color, category) in LEGEND {
        let close = legend_color
            .iter()
            .zip(color.iter())
            .all(|(a, b)| (a - b).abs() <= COLOR_TOLERANCE);
        if close {
            return Some(*category);
        }
    }

    None
}
