//! Extract command - run the dual-pass pipeline on a single estimate.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use bcif_core::document::{TokenDocument, Tokenizer};
use bcif_core::mapping::{self, BcifMapper, BcifMapping, MappingValidation};
use bcif_core::models::ReconciledClaim;
use bcif_core::{EstimateExtractor, PdfTextTokenizer};

use super::rules::load_rules;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, token dump JSON, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Emit the reconciled claim instead of the form mapping
    #[arg(long)]
    claim: bool,

    /// Print the validation report
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, mapping_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let rules = load_rules(mapping_path);
    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Extracting...");

    let document = load_document(&args.input)?;
    let extractor = EstimateExtractor::new(&rules);
    let claim = extractor.extract(&document);
    let bcif = BcifMapper::new().map(&claim);

    pb.finish_and_clear();

    if args.validate {
        print_validation(&mapping::validate(&bcif));
    }

    let output = if args.claim {
        format_claim(&claim, args.format)?
    } else {
        format_mapping(&bcif, args.format)?
    };

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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Turns an input file into a token document, dispatching on extension.
pub fn load_document(path: &Path) -> anyhow::Result<TokenDocument> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let data = fs::read(path)?;
    let document = match extension.as_str() {
        "pdf" => PdfTextTokenizer::new().tokenize(&data)?,
        "json" => TokenDocument::from_json_slice(&data)?,
        "txt" | "text" | "" => TokenDocument::from_text(String::from_utf8_lossy(&data)),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    debug!(
        "Loaded {} pages, {} characters of text",
        document.page_count(),
        document.full_text.len()
    );
    Ok(document)
}

pub fn format_mapping(mapping: &BcifMapping, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(mapping)?,
        OutputFormat::Text => mapping::render_summary(mapping),
    })
}

fn format_claim(claim: &ReconciledClaim, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(claim)?,
        OutputFormat::Text => {
            let mut out = String::new();
            for (name, value) in &claim.text_fields {
                out.push_str(&format!("{}: {}\n", name, value));
            }
            if !claim.checkbox_fields.is_empty() {
                let tokens: Vec<&str> = claim.checkbox_fields.iter().map(String::as_str).collect();
                out.push_str(&format!("checkboxes: {}\n", tokens.join(", ")));
            }
            out.push_str(&format!("confidence: {}%\n", claim.metadata.confidence));
            out
        }
    })
}

fn print_validation(validation: &MappingValidation) {
    if validation.valid && validation.warnings.is_empty() {
        eprintln!("{} Validation passed", style("✓").green());
        return;
    }
    if !validation.errors.is_empty() {
        eprintln!("{}", style("Validation errors:").red());
        for error in &validation.errors {
            eprintln!("  - {}", error);
        }
    }
    if !validation.warnings.is_empty() {
        eprintln!("{}", style("Validation warnings:").yellow());
        for warning in &validation.warnings {
            eprintln!("  - {}", warning);
        }
    }
}
