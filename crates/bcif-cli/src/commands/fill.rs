//! Fill command - send an estimate to the form-filling service.
//!
//! The service accepts the raw extracted text plus a template name and
//! returns filled PDF bytes. When it cannot be reached the command still
//! produces an artifact: the plain-text summary next to the requested
//! output path.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{info, warn};

use bcif_core::mapping::{self, BcifMapper};
use bcif_core::EstimateExtractor;

use super::extract::load_document;
use super::rules::load_rules;

const DEFAULT_SERVICE_URL: &str = "http://localhost:5000/fill-bcif";
const DEFAULT_TEMPLATE: &str = "Fillable_CCC_BCIF.pdf";

/// Arguments for the fill command.
#[derive(Args)]
pub struct FillArgs {
    /// Input file (PDF, token dump JSON, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file for the filled form
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Form-filling service endpoint
    #[arg(long, default_value = DEFAULT_SERVICE_URL)]
    service_url: String,

    /// Form template name on the service
    #[arg(long, default_value = DEFAULT_TEMPLATE)]
    template: String,
}

#[derive(Serialize)]
struct FillRequest<'a> {
    extracted_text: &'a str,
    template_name: &'a str,
}

pub async fn run(args: FillArgs, mapping_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let rules = load_rules(mapping_path);
    let document = load_document(&args.input)?;
    let extractor = EstimateExtractor::new(&rules);
    let claim = extractor.extract(&document);
    let bcif = BcifMapper::new().map(&claim);

    let validation = mapping::validate(&bcif);
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if !validation.valid {
        for error in &validation.errors {
            eprintln!("{} {}", style("✗").red(), error);
        }
        anyhow::bail!("Mapping failed validation");
    }

    info!(
        "Sending {} characters to {}",
        document.full_text.len(),
        args.service_url
    );

    match fill_via_service(&args, &document.full_text).await {
        Ok(bytes) => {
            fs::write(&args.output, &bytes)?;
            println!(
                "{} Filled form written to {} ({} bytes)",
                style("✓").green(),
                args.output.display(),
                bytes.len()
            );
        }
        Err(err) => {
            warn!("Form-fill service unavailable: {}", err);
            let fallback = args.output.with_extension("txt");
            fs::write(&fallback, mapping::render_summary(&bcif))?;
            println!(
                "{} Service unavailable, text summary written to {}",
                style("!").yellow(),
                fallback.display()
            );
        }
    }

    Ok(())
}

async fn fill_via_service(args: &FillArgs, extracted_text: &str) -> anyhow::Result<Vec<u8>> {
    let client = reqwest::Client::new();
    let response = client
        .post(&args.service_url)
        .json(&FillRequest {
            extracted_text,
            template_name: &args.template,
        })
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("Service returned {}", response.status());
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        anyhow::bail!("Service returned an empty document");
    }
    Ok(bytes.to_vec())
}
