//! IRAH-Premier CLI - assistential risk scoring for a 20-bed care unit

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use irah_core::config::{self, ResolvedConfig};
use irah_core::{
    admit, assess_with_config, compute_unit_aggregates_with_thresholds, load_admissions,
    render_assessment_json, render_assessment_text, render_csv, render_roster_text,
    render_unit_json, AsgCategory, Roster, SubScaleInputs,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "irah")]
#[command(about = "IRAH-Premier assistential risk scoring for a 20-bed care unit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single patient from sub-scale totals
    Assess {
        /// Charlson comorbidity total (only 0-13 contributes to the score)
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=50))]
        charlson: u8,

        /// Fugulin nursing-care-demand total
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=60))]
        fugulin: u8,

        /// MRC motor-strength total
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=60))]
        mrc: u8,

        /// ASG category label (A, B, or C; empty or unrecognized count as unset)
        #[arg(long, default_value = "")]
        asg: String,

        /// FOIS level
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u8).range(1..=7))]
        fois: u8,

        /// Continuous medication count
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=50))]
        polypharmacy: u8,

        /// Output format
        #[arg(long, default_value = "text")]
        format: AssessFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Report on a unit roster built from a JSON admissions file
    Unit {
        /// Path to a JSON array of admission requests
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: UnitFormat,

        /// Write the rendering to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without scoring anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum AssessFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum UnitFormat {
    Text,
    Json,
    Csv,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            charlson,
            fugulin,
            mrc,
            asg,
            fois,
            polypharmacy,
            format,
            config: config_path,
        } => {
            let resolved_config = load_config(config_path.as_deref())?;
            let inputs = SubScaleInputs {
                charlson,
                fugulin,
                mrc,
                asg: AsgCategory::parse_label(&asg),
                fois,
                polypharmacy,
            };

            let assessment = assess_with_config(&inputs, Some(&resolved_config));
            match format {
                AssessFormat::Text => print!("{}", render_assessment_text(&assessment)),
                AssessFormat::Json => println!("{}", render_assessment_json(&assessment)),
            }
        }
        Commands::Unit {
            path,
            format,
            output,
            config: config_path,
        } => {
            if !path.exists() {
                anyhow::bail!("Path does not exist: {}", path.display());
            }

            let resolved_config = load_config(config_path.as_deref())?;
            let admissions = load_admissions(&path)?;

            // Session-scoped store: created empty here, discarded on exit
            let mut roster = Roster::new();
            let mut skipped = 0usize;
            for request in &admissions {
                if let Err(e) = admit(&mut roster, request, Some(&resolved_config)) {
                    eprintln!("warning: skipping admission for bed {}: {}", request.bed, e);
                    skipped += 1;
                }
            }
            if skipped > 0 {
                eprintln!("Skipped {} admission(s) due to validation errors", skipped);
            }

            let aggregates =
                compute_unit_aggregates_with_thresholds(&roster, &resolved_config.thresholds);
            let rendering = match format {
                UnitFormat::Text => render_roster_text(&roster, aggregates.as_ref()),
                UnitFormat::Json => render_unit_json(&roster, aggregates.as_ref()),
                UnitFormat::Csv => render_csv(&roster),
            };

            match output {
                Some(output_path) => {
                    std::fs::write(&output_path, rendering).with_context(|| {
                        format!("failed to write output: {}", output_path.display())
                    })?;
                    eprintln!("Wrote {}", output_path.display());
                }
                None => print!("{}", rendering),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let cwd = std::env::current_dir()?;
                match config::load_and_resolve(&cwd, path.as_deref()) {
                    Ok(resolved) => {
                        if let Some(ref p) = resolved.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let cwd = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&cwd, path.as_deref())
                    .context("failed to load configuration")?;

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                println!("Weights:");
                println!("  charlson: {}", resolved.weights.charlson);
                println!("  fugulin: {}", resolved.weights.fugulin);
                println!("  mrc: {}", resolved.weights.mrc);
                println!("  asg: {}", resolved.weights.asg);
                println!("  fois: {}", resolved.weights.fois);
                println!("  polypharmacy: {}", resolved.weights.polypharmacy);
                println!();
                println!("Thresholds:");
                println!("  moderate: {}", resolved.thresholds.moderate);
                println!("  high: {}", resolved.thresholds.high);
            }
        },
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let cwd = std::env::current_dir()?;
    config::load_and_resolve(&cwd, explicit).context("failed to load configuration")
}
