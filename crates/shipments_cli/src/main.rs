mod output;

use anyhow::{Context, Result};
use clap::Parser;
use shipments_core::PolicyConfig;
use shipments_validator::{AuditPipeline, PolicyGate};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shipaudit")]
#[command(version, about = "Shipment batch audit pipeline", long_about = None)]
struct Cli {
    /// Path to the shipment batch file (.xlsx, .xls or .csv)
    input: PathBuf,

    /// Policy file overriding the built-in critical/exemption sets (YAML or TOML)
    #[arg(short, long)]
    policy: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    info!("Starting shipment batch audit");

    let mut table = shipments_loader::load_file(&cli.input)
        .with_context(|| format!("Failed to load batch file: {}", cli.input.display()))?;
    output::print_info(&format!(
        "Batch loaded: {} records, {} columns",
        table.len(),
        table.columns().len()
    ));

    let policy = match &cli.policy {
        Some(path) => {
            let policy = shipments_policy::parse_file(path)
                .with_context(|| format!("Failed to parse policy file: {}", path.display()))?;
            output::print_info(&format!(
                "Policy loaded: {} critical kinds, {} overweight exemptions",
                policy.critical_kinds.len(),
                policy.overweight_exemptions.len()
            ));
            policy
        }
        None => PolicyConfig::default(),
    };

    let pipeline = AuditPipeline::standard();
    let run = pipeline
        .run(&mut table, &policy)
        .context("Audit pipeline failed")?;

    output::print_audit_report(&run, &cli.format);

    let gate = PolicyGate::new(policy);
    match gate.enforce(&run.report) {
        Ok(()) => {
            info!("Audit finished successfully");
            output::print_success("Batch accepted");
        }
        Err(failure) => {
            error!("Audit failed: {failure}");
            output::print_error(&failure.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
