//! Rules command - inspect and manage mapping rule sets.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use bcif_core::rules::{builtin, MappingRules};

/// Arguments for the rules command.
#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(Subcommand)]
enum RulesCommand {
    /// Print the active rule set
    Show {
        /// Rule file to show instead of the active set
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Write the built-in rules to a file for customization
    Init {
        /// Destination path (default: the per-user rules location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Deep-merge a patch rule file into a base rule file
    Merge {
        /// Base rule file
        base: PathBuf,

        /// Patch rule file
        patch: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the per-user rules location
    Path,
}

pub async fn run(args: RulesArgs) -> anyhow::Result<()> {
    match args.command {
        RulesCommand::Show { file } => show(file.as_deref()),
        RulesCommand::Init { output, force } => init(output, force),
        RulesCommand::Merge {
            base,
            patch,
            output,
        } => merge(&base, &patch, output.as_deref()),
        RulesCommand::Path => {
            println!("{}", default_rules_path().display());
            Ok(())
        }
    }
}

/// Where a per-user rule file is looked for when no `--mapping` is given.
pub fn default_rules_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bcif")
        .join("bcif-mapping.json")
}

/// Resolves the active rule set: explicit file, then the per-user file,
/// then the built-in default. Unreadable files degrade instead of aborting.
pub fn load_rules(explicit: Option<&str>) -> MappingRules {
    if let Some(path) = explicit {
        return MappingRules::load_or_fallback(path);
    }

    let user_rules = default_rules_path();
    if user_rules.exists() {
        debug!("Using per-user rules at {}", user_rules.display());
        return MappingRules::load_or_fallback(&user_rules);
    }

    builtin::default_rules()
}

fn show(file: Option<&Path>) -> anyhow::Result<()> {
    let rules = match file {
        Some(path) => MappingRules::from_file(path)?,
        None => load_rules(None),
    };

    if let Some(name) = &rules.meta.name {
        eprintln!(
            "{} {} v{} ({} field rules, {} checkbox rules)",
            style("ℹ").blue(),
            name,
            rules.meta.version.as_deref().unwrap_or("?"),
            rules.text_fields.len(),
            rules.checkbox_rules.rules.len()
        );
    }
    println!("{}", serde_json::to_string_pretty(&rules)?);
    Ok(())
}

fn init(output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let target = output.unwrap_or_else(default_rules_path);

    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite",
            target.display()
        );
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    builtin::default_rules().save(&target)?;
    println!(
        "{} Rules written to {}",
        style("✓").green(),
        target.display()
    );
    Ok(())
}

fn merge(base: &Path, patch: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let base_rules = MappingRules::from_file(base)?;
    let patch_rules = MappingRules::from_file(patch)?;
    let merged = base_rules.merge(&patch_rules);

    match output {
        Some(path) => {
            merged.save(path)?;
            println!(
                "{} Merged rules written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&merged)?),
    }
    Ok(())
}
