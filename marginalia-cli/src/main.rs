use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marginalia::{HighlightScanner, PdfiumSource, ScanOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Parser)]
#[command(
    name = "marginalia",
    about = "Extract and classify colored highlight annotations from PDF documents",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract highlight records and print a per-category summary
    Extract {
        /// Input PDF file
        input: PathBuf,

        /// Write the JSON report to this file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write a CSV table (page, text, annotation_type) to this file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,

        /// Minimum covered fraction for a word to count as highlighted
        #[arg(long)]
        threshold: Option<f64>,

        /// Minimum letter-to-character ratio of acceptable text
        #[arg(long)]
        min_letter_ratio: Option<f64>,
    },

    /// Count highlight colors in a PDF
    Colors {
        /// Input PDF file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Extract {
            input,
            json,
            csv,
            pretty,
            threshold,
            min_letter_ratio,
        } => {
            let mut options = ScanOptions::default();
            if let Some(threshold) = threshold {
                options.containment_threshold = threshold;
            }
            if let Some(ratio) = min_letter_ratio {
                options.filter.min_letter_ratio = ratio;
            }

            let source = PdfiumSource::new().context("failed to load the pdfium library")?;
            let scanner = HighlightScanner::with_options(source, options);
            let outcome = scanner
                .scan_file(&input)
                .with_context(|| format!("failed to scan {}", input.display()))?;

            for error in &outcome.page_errors {
                eprintln!("Warning: {error}");
            }

            print!("{}", report::category_summary(&outcome.records));

            if let Some(path) = &json {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let envelope = report::Report::new(&input, &outcome.records);
                if pretty {
                    serde_json::to_writer_pretty(file, &envelope)?;
                } else {
                    serde_json::to_writer(file, &envelope)?;
                }
                println!("✓ JSON report written to: {}", path.display());
            }

            if let Some(path) = &csv {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                report::write_csv(file, &outcome.records)?;
                println!("✓ CSV table written to: {}", path.display());
            }
        }

        Commands::Colors { input } => {
            let source = PdfiumSource::new().context("failed to load the pdfium library")?;
            let scanner = HighlightScanner::new(source);
            let stats = scanner
                .color_stats(&input)
                .with_context(|| format!("failed to scan {}", input.display()))?;

            println!("Color statistics for {}:", input.display());
            for (color, count) in stats {
                println!(
                    "  ({:.2}, {:.2}, {:.2}): {} highlights",
                    color[0], color[1], color[2], count
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "marginalia=debug"
    } else {
        "marginalia=error"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
