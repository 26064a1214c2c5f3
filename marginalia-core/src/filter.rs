//! Quality filter for extracted highlight text
//!
//! Highlight boundaries frequently bleed into adjacent page furniture
//! (running headers, URLs, figure captions, page numbers). This filter
//! rejects such fragments before a record is emitted. All thresholds and
//! word lists are empirically tuned against reviewed documents, so they are
//! carried in [`FilterOptions`] instead of being hard-coded.

/// Tuning knobs for [`is_quality_text`]
///
/// # Examples
///
/// ```rust
/// use marginalia::filter::{is_quality_text, FilterOptions};
///
/// let options = FilterOptions::default();
/// assert!(is_quality_text("requires two independent factors", &options));
/// assert!(!is_quality_text("42", &options));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    /// Minimum length of the trimmed text (anything shorter is noise)
    pub min_trimmed_len: usize,
    /// Minimum length of the trimmed text for non-numeric content
    pub min_content_len: usize,
    /// Minimum ratio of alphabetic characters over the whole string
    pub min_letter_ratio: f64,
    /// Substrings marking URLs and web content, matched case-insensitively
    pub url_indicators: Vec<String>,
    /// Layout artifact words rejected on exact (case-insensitive) match
    pub artifact_words: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            min_trimmed_len: 2,
            min_content_len: 3,
            min_letter_ratio: 0.3,
            url_indicators: ["http", "www.", ".com", ".org", ".gov", ".edu", "doi.org"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            artifact_words: ["page", "figure", "table", "appendix", "section"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Check whether extracted text is meaningful highlighted content
///
/// The checks are independent; failing any one rejects the text:
/// trimmed length under `min_trimmed_len`, a URL indicator substring,
/// an exact artifact-word match, purely numeric content, trimmed length
/// under `min_content_len`, or a letter ratio below `min_letter_ratio`
/// (computed over the raw string, whitespace included).
pub fn is_quality_text(text: &str, options: &FilterOptions) -> bool {
    let trimmed = text.trim();
    let trimmed_len = trimmed.chars().count();
    if trimmed_len < options.min_trimmed_len {
        return false;
    }

    let lower = trimmed.to_lowercase();
    if options
        .url_indicators
        .iter()
        .any(|indicator| lower.contains(indicator.as_str()))
    {
        return false;
    }

    if options.artifact_words.iter().any(|word| lower == *word) {
        return false;
    }

    let all_digits = trimmed.chars().all(|c| c.is_ascii_digit());
    if all_digits || trimmed_len < options.min_content_len {
        return false;
    }

    let total = text.chars().count();
    if total > 0 {
        let letters = text.chars().filter(|c| c.is_alphabetic()).count();
        if (letters as f64) / (total as f64) < options.min_letter_ratio {
            return false;
        }
    }

    true
}
