//! Validate command - check a data file against a schema.

use std::path::{Path, PathBuf};

use colored::Colorize;
use csvlint::input::ParserConfig;
use csvlint::{Diagnostic, LintConfig, LintReport, Linter, Schema, Severity};

pub fn run(
    file: PathBuf,
    schema_uri: &str,
    delimiter: Option<u8>,
    max_rows: Option<usize>,
    max_diagnostics: Option<usize>,
    json_output: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let schema = Schema::load_from_uri(schema_uri)
        .ok_or_else(|| format!("Could not load schema: {}", schema_uri))?;

    let config = LintConfig {
        parser: ParserConfig {
            delimiter,
            max_rows,
            ..Default::default()
        },
        max_diagnostics,
    };

    let report = Linter::with_config(schema, config).lint_file(&file)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&file, &report);
    }

    Ok(report.valid)
}

fn print_report(file: &Path, report: &LintReport) {
    println!(
        "{} {} {} {}",
        "Validating".cyan().bold(),
        file.display().to_string().white(),
        "against".cyan(),
        report.schema_uri.white()
    );
    println!();

    for diagnostic in &report.errors {
        print_diagnostic(Severity::Error, diagnostic);
    }
    for diagnostic in &report.warnings {
        print_diagnostic(Severity::Warning, diagnostic);
    }
    if report.summary.truncated {
        println!("  {}", "(further diagnostics omitted)".dimmed());
    }
    if !report.errors.is_empty() || !report.warnings.is_empty() {
        println!();
    }

    println!(
        "Checked {} rows: {} errors, {} warnings",
        report.summary.rows_checked.to_string().white().bold(),
        report.summary.error_count.to_string().red(),
        report.summary.warning_count.to_string().yellow()
    );

    if report.valid {
        println!("{}", "Valid".green().bold());
    } else {
        println!("{}", "Invalid".red().bold());
    }
}

fn print_diagnostic(severity: Severity, diagnostic: &Diagnostic) {
    let label = match severity {
        Severity::Error => severity.label().to_lowercase().red().bold(),
        Severity::Warning => severity.label().to_lowercase().yellow(),
    };
    println!("  {:7} {}", label, diagnostic);
}
