//! Report rendering: console summary, JSON envelope, CSV table

use std::path::Path;

use anyhow::Result;
use marginalia::{Category, HighlightRecord};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// How many example texts the summary shows per category
const SUMMARY_EXAMPLES: usize = 3;

/// Character limit for one summary line of text
const SUMMARY_TEXT_LIMIT: usize = 150;

/// JSON report envelope
///
/// Field order matches the serialized output: source file, total, records,
/// then the category legend.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub pdf_file: String,
    pub total_highlights: usize,
    pub highlights: &'a [HighlightRecord],
    #[serde(serialize_with = "legend_as_map")]
    pub annotation_types: &'static [Category],
}

impl<'a> Report<'a> {
    /// Build the envelope for one scanned file
    pub fn new(pdf_file: &Path, highlights: &'a [HighlightRecord]) -> Self {
        Self {
            pdf_file: pdf_file.display().to_string(),
            total_highlights: highlights.len(),
            highlights,
            annotation_types: &Category::ALL,
        }
    }
}

fn legend_as_map<S>(categories: &&'static [Category], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(categories.len()))?;
    for category in *categories {
        map.serialize_entry(category.code(), category.label())?;
    }
    map.end()
}

/// Render the per-category console summary
///
/// One block per category with at least one record: a header with the
/// count, the first few texts (truncated), and a "... and N more" line
/// when the block is cut off. Uncategorized records count toward the total
/// but get no block.
pub fn category_summary(records: &[HighlightRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Found {} highlighted sections\n",
        records.len()
    ));

    for category in Category::ALL {
        let items: Vec<&HighlightRecord> = records
            .iter()
            .filter(|r| r.annotation_type == Some(category))
            .collect();
        if items.is_empty() {
            continue;
        }

        out.push('\n');
        out.push_str(&format!(
            "=== {} ({} items) ===\n",
            category.code(),
            items.len()
        ));
        for (i, item) in items.iter().take(SUMMARY_EXAMPLES).enumerate() {
            out.push_str(&format!(
                "{}. Page {}: {}\n",
                i + 1,
                item.page,
                truncate(&item.text, SUMMARY_TEXT_LIMIT)
            ));
        }
        if items.len() > SUMMARY_EXAMPLES {
            out.push_str(&format!(
                "   ... and {} more\n",
                items.len() - SUMMARY_EXAMPLES
            ));
        }
    }
    out
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Write records as a CSV table with columns page, text, annotation_type
///
/// Records without a category get `Unknown` in the last column, matching
/// the spreadsheet export shape of the JSON envelope consumers.
pub fn write_csv<W: std::io::Write>(writer: W, records: &[HighlightRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["page", "text", "annotation_type"])?;
    for record in records {
        let page = record.page.to_string();
        let category = record.annotation_type.map_or("Unknown", |c| c.code());
        csv_writer.write_record([page.as_str(), record.text.as_str(), category])?;
    }
    csv_writer.flush()?;
    Ok(())
}
