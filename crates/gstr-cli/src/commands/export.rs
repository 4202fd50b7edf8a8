//! Export command - write reviewed rows as a GSTR-1 B2B CSV.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use gstr_core::{export_csv, Gstr1B2BRow};

use super::load_config;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// JSON file holding an array of B2B rows
    #[arg(required = true)]
    input: PathBuf,

    /// Output file or directory (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Refuse to export when any row has validation issues
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: ExportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let content = fs::read_to_string(&args.input)?;
    let rows: Vec<Gstr1B2BRow> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid rows file {}: {}", args.input.display(), e))?;

    info!("Loaded {} rows from {}", rows.len(), args.input.display());

    let mut issue_count = 0;
    for (i, row) in rows.iter().enumerate() {
        let issues = row.validate();
        if issues.is_empty() {
            continue;
        }
        if issue_count == 0 {
            eprintln!("{}", style("Validation issues:").yellow());
        }
        issue_count += issues.len();
        for issue in &issues {
            eprintln!("  - row {}: {}", i + 1, issue);
        }
    }

    if args.strict && issue_count > 0 {
        anyhow::bail!("{} validation issues found, nothing exported", issue_count);
    }

    let csv = export_csv(&rows)?;

    match &args.output {
        Some(output) => {
            let output_path = if output.is_dir() {
                output.join(&config.export.file_name)
            } else {
                output.clone()
            };
            fs::write(&output_path, &csv)?;
            eprintln!(
                "{} Exported {} rows to {}",
                style("✓").green(),
                rows.len(),
                output_path.display()
            );
        }
        None => print!("{}", csv),
    }

    Ok(())
}
