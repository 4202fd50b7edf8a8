//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use gstr_core::models::config::GstrConfig;
use gstr_core::{
    decode_image, unreadable_image, InMemoryStore, InvoiceExtraction, InvoiceParser,
    InvoiceRepository, PureOcrEngine, StoredInvoice,
};

use super::extract::{format_extraction, OutputFormat};
use super::{extension_of, load_config, load_engine, IMAGE_EXTENSIONS};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    stored: Option<StoredInvoice>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// Lazily loaded OCR engine shared by every image in the batch.
struct EngineSlot<'a> {
    model_dir: Option<&'a Path>,
    config: &'a GstrConfig,
    engine: Option<PureOcrEngine>,
}

impl EngineSlot<'_> {
    fn get(&mut self) -> anyhow::Result<&PureOcrEngine> {
        if self.engine.is_none() {
            self.engine = Some(load_engine(self.model_dir, self.config)?);
        }
        self.engine
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("OCR engine unavailable"))
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = extension_of(p);
            ext == "txt" || IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let store = InMemoryStore::new();
    let parser = InvoiceParser::with_config(config.extraction.clone());
    let mut engine = EngineSlot {
        model_dir: args.model_dir.as_deref(),
        config: &config,
        engine: None,
    };
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &parser, &mut engine);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(extraction) => {
                let stored = store.save(extraction)?;
                results.push(ProcessResult {
                    path,
                    stored: Some(stored),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        stored: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let Some(stored) = &result.stored else {
                continue;
            };
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");
            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_extraction(&stored.extraction, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let stats = store.stats()?;

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} stored, {} with warnings, {} failed",
        style(stats.total_invoices).green(),
        style(stats.warning_count).yellow(),
        style(failed.len()).red()
    );
    println!("   Total taxable value: {}", stats.total_taxable_value);
    println!("   Total tax:           {}", stats.total_tax);
    println!("   Avg OCR confidence:  {:.2}", stats.avg_confidence);

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    parser: &InvoiceParser,
    engine: &mut EngineSlot<'_>,
) -> anyhow::Result<InvoiceExtraction> {
    let extension = extension_of(path);

    if extension == "txt" {
        let text = fs::read_to_string(path)?;
        return Ok(parser.parse(&text));
    }

    let bytes = fs::read(path)?;
    let Some(image) = decode_image(&bytes) else {
        return Ok(unreadable_image());
    };

    let engine = engine.get()?;
    parser
        .scan_decoded(engine, &image)
        .map_err(|e| anyhow::anyhow!("OCR failed: {}", e))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "id",
        "gstin",
        "invoice_no",
        "invoice_date",
        "taxable_value",
        "total_tax",
        "invoice_value",
        "confidence",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(stored) = &result.stored {
            let extraction = &stored.extraction;
            let money = &extraction.money;
            let status = if extraction.has_warnings() { "warning" } else { "valid" };

            wtr.write_record([
                filename,
                status,
                &stored.id,
                extraction.gstin.as_deref().unwrap_or(""),
                extraction.invoice_no.as_deref().unwrap_or(""),
                extraction.invoice_date.as_deref().unwrap_or(""),
                &cell(money.taxable_value),
                &cell(money.total_tax),
                &cell(money.invoice_value),
                &extraction
                    .ocr_confidence
                    .map(|c| format!("{:.2}", c))
                    .unwrap_or_default(),
                &extraction.warnings.join("; "),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
