//! Batch command - process multiple estimate files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use bcif_core::mapping::BcifMapper;
use bcif_core::models::ReconciledClaim;
use bcif_core::EstimateExtractor;

use super::extract::load_document;
use super::rules::load_rules;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    pattern: String,

    /// Directory for per-file mapping JSON
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write a summary CSV to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    claim: Option<ReconciledClaim>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, mapping_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "json" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.pattern);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let rules = load_rules(mapping_path);
    let extractor = EstimateExtractor::new(&rules);
    let mapper = BcifMapper::new();

    // Set up progress bars
    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        match process_single_file(&path, &extractor, &mapper, args.output_dir.as_deref()) {
            Ok(claim) => {
                results.push(BatchResult {
                    path,
                    claim: Some(claim),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(BatchResult {
                        path,
                        claim: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.claim.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

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
    path: &PathBuf,
    extractor: &EstimateExtractor,
    mapper: &BcifMapper,
    output_dir: Option<&std::path::Path>,
) -> anyhow::Result<ReconciledClaim> {
    let document = load_document(path)?;
    let claim = extractor.extract(&document);

    if let Some(output_dir) = output_dir {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("claim");
        let output_path = output_dir.join(format!("{}.json", stem));
        let mapping = mapper.map(&claim);
        fs::write(&output_path, serde_json::to_string_pretty(&mapping)?)?;
        debug!("Wrote mapping to {}", output_path.display());
    }

    Ok(claim)
}

fn write_summary(path: &PathBuf, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "claim_number",
        "vin",
        "year",
        "make",
        "model",
        "confidence",
        "status",
    ])?;

    for result in results {
        let file = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &result.claim {
            Some(claim) => {
                let confidence = claim.metadata.confidence.to_string();
                wtr.write_record([
                    file,
                    claim.field("claim_number").unwrap_or(""),
                    claim.field("vin").unwrap_or(""),
                    claim.field("year").unwrap_or(""),
                    claim.field("make").unwrap_or(""),
                    claim.field("model").unwrap_or(""),
                    confidence.as_str(),
                    "success",
                ])?;
            }
            None => {
                wtr.write_record([file, "", "", "", "", "", "", "failed"])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
