//! bulk-import - batched bulk user import
//!
//! Validates a JSON array of user rows and submits the accepted records to
//! the console API in batches.

#![allow(missing_docs)]

use anyhow::{Context, bail};
use bulk_import::config::{Config, LogFormat};
use bulk_import::utils::logging::init_logging;
use bulk_import::{
    BatchFailurePolicy, BulkImporter, BulkUserApi, HttpBulkUserApi, ImportError, ImportOptions,
    RawRow, RecordValidator, ValidationResult, write_error_report,
};
use clap::Parser;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Exit code when the run finished but some rows or records failed
const EXIT_PARTIAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "bulk-import", version, about = "Bulk user import for the console API")]
struct Cli {
    /// YAML configuration file
    #[arg(long, short = 'c', env = "BULK_IMPORT_CONFIG")]
    config: Option<PathBuf>,
    /// JSON array of row objects keyed by column name
    #[arg(long, short = 'i')]
    input: PathBuf,
    /// Ask the server to validate the records without creating them
    #[arg(long, conflicts_with = "dry_run")]
    validate_only: bool,
    /// Validate locally and stop before any network call
    #[arg(long)]
    dry_run: bool,
    /// Write validation errors to this CSV file
    #[arg(long)]
    error_report: Option<PathBuf>,
    /// Records per request
    #[arg(long)]
    batch_size: Option<usize>,
    /// Stop at the first batch that exhausts its retries
    #[arg(long)]
    abort_on_batch_failure: bool,
    /// Log output format (text or json)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli).await?;
    init_logging(&config.logging)?;
    let build = bulk_import::build_info();
    info!(
        git_hash = build.git_hash,
        build_time = build.build_time,
        "bulk-import {} starting",
        build.version
    );

    let rows = read_rows(&cli.input).await?;
    let validation = RecordValidator::new(&config.validation).validate(&rows);
    info!(
        total = validation.total_rows,
        valid = validation.valid_rows,
        invalid = validation.invalid_rows,
        "Validation finished"
    );

    if let Some(path) = &cli.error_report {
        if !validation.errors.is_empty() {
            write_error_report(path, &validation.errors).await?;
            info!("Error report written to {}", path.display());
        }
    }

    if cli.dry_run || !validation.valid {
        print_json(&validation_summary(&validation))?;
        if !validation.valid {
            warn!("{} validation errors, nothing imported", validation.errors.len());
            return Ok(ExitCode::from(EXIT_PARTIAL));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let api = Arc::new(HttpBulkUserApi::new(
        config.endpoint.clone(),
        config.import.request_timeout(),
    )?);

    if cli.validate_only {
        let result = api.validate_only(&validation.valid_records).await?;
        print_json(&json!({ "validation": validation_summary(&validation), "server": result }))?;
        return Ok(exit_for(result.failed_count));
    }

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current batch");
            let _ = cancel_tx.send(true);
        }
    });

    let options = ImportOptions::from_settings(&config.import)
        .with_cancellation(cancel_rx)
        .with_progress(|progress| {
            info!(
                processed = progress.processed,
                total = progress.total,
                success = progress.success,
                failed = progress.failed,
                "Import progress {}%",
                progress.percentage
            );
        });

    let report = match BulkImporter::new(api, options)
        .run(&validation.valid_records)
        .await
    {
        Ok(report) => report,
        Err(ImportError::Aborted {
            batch_index,
            partial,
            source,
        }) => {
            error!("Import aborted at batch {}: {}", batch_index + 1, source);
            print_json(&json!({ "validation": validation_summary(&validation), "partial": partial }))?;
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let failed = report.result.failed_count;
    print_json(&json!({ "validation": validation_summary(&validation), "import": report }))?;
    Ok(exit_for(failed))
}

/// File and environment, then command-line overrides
async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = Config::load_with(cli.config.as_deref(), |config| {
        if let Some(batch_size) = cli.batch_size {
            config.import.batch_size = batch_size;
        }
        if cli.abort_on_batch_failure {
            config.import.on_batch_failure = BatchFailurePolicy::Abort;
        }
        if let Some(format) = cli.log_format {
            config.logging.format = format;
        }
    })
    .await
    .context("Failed to load configuration")?;

    Ok(config)
}

async fn read_rows(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("{} is not JSON", path.display()))?;

    let serde_json::Value::Array(items) = value else {
        bail!("{} must contain a JSON array of row objects", path.display());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(row) => Ok(row),
            other => bail!("Row {} is not an object: {}", index + 1, other),
        })
        .collect()
}

fn validation_summary(validation: &ValidationResult) -> serde_json::Value {
    json!({
        "valid": validation.valid,
        "totalRows": validation.total_rows,
        "validRows": validation.valid_rows,
        "invalidRows": validation.invalid_rows,
        "errors": validation.errors,
    })
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_for(failed: usize) -> ExitCode {
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_PARTIAL)
    }
}
