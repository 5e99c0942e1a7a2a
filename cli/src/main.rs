//! fieldcheck: command-line front end for the validator.
//!
//! Usage:
//!   fieldcheck check --schema signup.json --record input.json
//!   fieldcheck check --schema signup.json --record input.json --config options.toml --strict
//!   fieldcheck describe --schema signup.json
//!   fieldcheck rules
//!
//! `check` prints the error map as JSON and exits 0 when the record passed,
//! 1 when any field failed, and 2 on a configuration or I/O error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fieldcheck_contracts::{FieldcheckError, FieldcheckResult, RuleKind, ValidatorOptions};
use fieldcheck_engine::{RuleMessage, Schema, Validator, ValidatorConfig};
use fieldcheck_rules::default_message;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Validate JSON records against a declarative field schema.
#[derive(Parser)]
#[command(
    name = "fieldcheck",
    about = "Schema-driven field validation",
    long_about = "Validates JSON records against a schema of per-field rules and\n\
                  reports every failing rule as a human-readable message."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one record and print the failures per field.
    Check {
        /// JSON schema document.
        #[arg(long)]
        schema: PathBuf,
        /// JSON object to validate.
        #[arg(long)]
        record: PathBuf,
        /// TOML options file (strict mode, message templates).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Report record keys the schema does not declare.
        #[arg(long)]
        strict: bool,
    },
    /// Print the compiled rules of each schema field.
    Describe {
        /// JSON schema document.
        #[arg(long)]
        schema: PathBuf,
    },
    /// List every rule the registry knows.
    Rules,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Set RUST_LOG=debug to trace every failing rule.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check {
            schema,
            record,
            config,
            strict,
        } => run_check(&schema, &record, config.as_deref(), strict),
        Command::Describe { schema } => run_describe(&schema).map(|()| ExitCode::SUCCESS),
        Command::Rules => {
            print_rules();
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fieldcheck error: {}", e);
            ExitCode::from(2)
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_check(
    schema_path: &Path,
    record_path: &Path,
    config_path: Option<&Path>,
    strict: bool,
) -> FieldcheckResult<ExitCode> {
    let mut options = match config_path {
        Some(path) => ValidatorConfig::from_file(path)?.into_options(),
        None => ValidatorOptions::new(),
    };
    // The flag can only turn strict mode on.
    options.strict |= strict;

    let validator = Validator::new(Schema::from_file(schema_path)?, options);
    let record = read_record(record_path)?;
    let errors = validator.test_value(&record)?;

    let rendered = serde_json::to_string_pretty(&errors).map_err(|e| FieldcheckError::ConfigError {
        reason: format!("failed to render results: {}", e),
    })?;
    println!("{}", rendered);

    debug!(failed_fields = errors.len(), "check finished");
    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn run_describe(schema_path: &Path) -> FieldcheckResult<()> {
    let schema = Schema::from_file(schema_path)?;

    for field in schema.fields() {
        println!("{} ({})", field.name(), field.display_name());
        for compiled in field.rules() {
            match &compiled.message {
                RuleMessage::Literal(text) => {
                    println!("  - {:<32} \"{}\"", compiled.descriptor.to_string(), text)
                }
                RuleMessage::Generated => println!("  - {}", compiled.descriptor),
            }
        }
    }
    Ok(())
}

fn print_rules() {
    for kind in RuleKind::ALL {
        let sample = match kind {
            RuleKind::Type => Some("string"),
            RuleKind::MinimumLength | RuleKind::MaximumLength => Some("8"),
            RuleKind::LessThan
            | RuleKind::LessThanOrEqual
            | RuleKind::GreaterThan
            | RuleKind::GreaterThanOrEqual
            | RuleKind::Equal => Some("10"),
            RuleKind::Regex => Some("/^[a-z]+$/i"),
            RuleKind::Match => Some("password"),
            RuleKind::Enumerated => Some("red,green,blue"),
            _ => None,
        };
        let descriptor = match sample {
            Some(value) => format!("{}:{}", kind, value),
            None => kind.to_string(),
        };
        println!(
            "{:<28} {}",
            descriptor,
            default_message(kind, "Field Name", sample)
        );
    }
}

fn read_record(path: &Path) -> FieldcheckResult<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| FieldcheckError::ConfigError {
        reason: format!("failed to read record file '{}': {}", path.display(), e),
    })?;
    serde_json::from_str(&contents).map_err(|e| FieldcheckError::InvalidRecord {
        reason: format!("failed to parse record JSON: {}", e),
    })
}
