//! Process command - reconcile one invoice document against a goods CSV.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info};

use invmatch_core::models::Catalog;
use invmatch_core::{CatalogIndex, DocumentKind, DocumentLoader, InvoiceReconciler, SegmentMode};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input document (PDF, image, text or CSV)
    #[arg(short, long)]
    input: PathBuf,

    /// Goods CSV with product code and name columns
    #[arg(short, long)]
    goods: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "fuzzy_match_result.json")]
    output: PathBuf,

    /// Minimum match score (0-100); lines below it are left out
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score: Option<u8>,

    /// Tax amount copied into the summary
    #[arg(long, allow_negative_numbers = true)]
    tax: Option<i64>,

    /// Status label copied into the summary
    #[arg(long)]
    status: Option<String>,

    /// How lines are split into header fields and item lines
    /// (default: by document kind)
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Treat the input as this kind instead of using its extension
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    /// Write the full report (summary, unmatched lines, warnings)
    #[arg(long)]
    report: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// Decide from the document's lines
    Auto,
    /// Header fields plus an item section
    Structured,
    /// Every line is an item line
    FreeText,
    /// Free text for text and images, structured for CSV and PDF
    ByKind,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    Csv,
    Pdf,
    Image,
    Text,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Csv => DocumentKind::Csv,
            KindArg::Pdf => DocumentKind::Pdf,
            KindArg::Image => DocumentKind::Image,
            KindArg::Text => DocumentKind::Text,
        }
    }
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if !args.goods.exists() {
        anyhow::bail!("Goods file not found: {}", args.goods.display());
    }

    let kind = match args.kind {
        Some(kind) => kind.into(),
        None => DocumentKind::from_path(&args.input)?,
    };
    let mode = match args.mode {
        Some(ModeArg::Auto) => SegmentMode::Auto,
        Some(ModeArg::Structured) => SegmentMode::Structured,
        Some(ModeArg::FreeText) => SegmentMode::FreeText,
        Some(ModeArg::ByKind) => kind.natural_mode(),
        None => config.matching.mode.unwrap_or_else(|| kind.natural_mode()),
    };

    info!("Processing {} as {}", args.input.display(), kind);

    let catalog = Catalog::from_csv_path(&args.goods, &config.catalog)
        .with_context(|| format!("Failed to load goods from {}", args.goods.display()))?;
    let index = CatalogIndex::new(&catalog);
    debug!("Loaded {} products", catalog.len());

    let mut reconciler = InvoiceReconciler::from_config(&config.matching, &config.summary)
        .with_mode(mode);
    if let Some(min_score) = args.min_score {
        reconciler = reconciler.with_min_score(Some(min_score));
    }
    if let Some(tax) = args.tax {
        reconciler = reconciler.with_tax(tax);
    }
    if let Some(status) = args.status {
        reconciler = reconciler.with_status(status);
    }

    let data = fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let loader = DocumentLoader::from_config(&config);
    let report = reconciler.reconcile_document(&index, &loader, &data, kind)?;

    for warning in &report.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let output = if args.report {
        serde_json::to_string_pretty(&report)?
    } else {
        report.summary.to_json_pretty()?
    };
    fs::write(&args.output, output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "{} Matched {} of {} item lines, total {}",
        style("✓").green(),
        report.summary.items.len(),
        report.item_line_count,
        report.summary.total_amount
    );
    println!(
        "{} Output written to {}",
        style("✓").green(),
        args.output.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
