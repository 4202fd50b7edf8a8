//! Extract command - read fields from a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use gstr_core::models::config::GstrConfig;
use gstr_core::{decode_image, unreadable_image, InvoiceExtraction, InvoiceParser};

use super::{extension_of, load_config, load_engine, IMAGE_EXTENSIONS};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (plain text OCR output or an image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Show OCR confidence and processing time
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    let parser = InvoiceParser::with_config(config.extraction.clone());
    let extension = extension_of(&args.input);

    let extraction = if extension == "txt" {
        pb.set_message("Reading text...");
        pb.set_position(30);
        let text = fs::read_to_string(&args.input)?;
        parser.parse(&text)
    } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        scan_image(&args, &config, &parser, &pb)?
    } else {
        pb.finish_and_clear();
        anyhow::bail!("Unsupported file format: {}", extension);
    };

    pb.finish_and_clear();

    if extraction.has_warnings() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &extraction.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_extraction(&extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        match extraction.ocr_confidence {
            Some(confidence) => println!(
                "{} OCR confidence: {:.1}%",
                style("ℹ").blue(),
                confidence * 100.0
            ),
            None => println!("{} OCR confidence: n/a", style("ℹ").blue()),
        }
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            start.elapsed().as_millis()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn scan_image(
    args: &ExtractArgs,
    config: &GstrConfig,
    parser: &InvoiceParser,
    pb: &ProgressBar,
) -> anyhow::Result<InvoiceExtraction> {
    pb.set_message("Decoding image...");
    pb.set_position(5);

    let bytes = fs::read(&args.input)?;
    let Some(image) = decode_image(&bytes) else {
        pb.set_position(100);
        return Ok(unreadable_image());
    };

    pb.set_message("Loading OCR models...");
    pb.set_position(10);

    let engine = load_engine(args.model_dir.as_deref(), config)?;

    pb.set_message("Running OCR...");
    pb.set_position(40);

    let extraction = parser
        .scan_decoded(&engine, &image)
        .map_err(|e| anyhow::anyhow!("OCR failed: {}", e))?;

    pb.set_position(100);

    Ok(extraction)
}

/// Render an extraction in the requested format.
pub fn format_extraction(
    extraction: &InvoiceExtraction,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(extraction)?),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_text(extraction: &InvoiceExtraction) -> String {
    fn or_dash<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
    }

    let money = &extraction.money;
    let mut output = String::new();

    output.push_str(&format!("GSTIN: {}\n", or_dash(extraction.gstin.as_deref())));
    if extraction.gstin_candidates.len() > 1 {
        output.push_str(&format!(
            "Other GSTINs: {}\n",
            extraction.gstin_candidates[1..].join(", ")
        ));
    }
    output.push_str(&format!("Invoice: {}\n", or_dash(extraction.invoice_no.as_deref())));
    output.push_str(&format!("Date: {}\n", or_dash(extraction.invoice_date.as_deref())));
    output.push('\n');

    output.push_str("Amounts:\n");
    output.push_str(&format!("  Taxable value: {}\n", or_dash(money.taxable_value)));
    output.push_str(&format!("  CGST:          {}\n", or_dash(money.cgst)));
    output.push_str(&format!("  SGST:          {}\n", or_dash(money.sgst)));
    output.push_str(&format!("  IGST:          {}\n", or_dash(money.igst)));
    output.push_str(&format!(
        "  Total tax:     {}{}\n",
        or_dash(money.total_tax),
        if money.total_tax_derived { " (derived)" } else { "" }
    ));
    output.push_str(&format!("  Invoice value: {}\n", or_dash(money.invoice_value)));

    output
}
