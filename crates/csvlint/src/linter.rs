//! Validation sessions: run a whole table through a schema.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::error::Result;
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::schema::Schema;
use crate::validation::{Diagnostic, Diagnostics, Severity};

/// Configuration for a lint run.
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Stop recording diagnostics after this many (None = unlimited).
    /// Validity is still computed over every row.
    pub max_diagnostics: Option<usize>,
}

/// Outcome of validating one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintReport {
    /// Identifier of the schema used.
    pub schema_uri: String,
    /// Metadata about the source file, when linting a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// True iff no error was found in the header or any row.
    pub valid: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub summary: LintSummary,
}

/// Counts for a lint run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintSummary {
    /// Number of data rows validated.
    pub rows_checked: usize,
    /// Total errors found, including any not recorded.
    pub error_count: usize,
    /// Total warnings found, including any not recorded.
    pub warning_count: usize,
    /// Diagnostics per kind, in order of first occurrence.
    pub by_kind: IndexMap<String, usize>,
    /// True if `max_diagnostics` cut the recorded lists short.
    pub truncated: bool,
}

/// One validation session over one table.
///
/// The schema's per-column uniqueness state belongs to this session, so a
/// `Linter` is consumed by the run.
pub struct Linter {
    config: LintConfig,
    schema: Schema,
}

impl Linter {
    /// Create a linter with default configuration.
    pub fn new(schema: Schema) -> Self {
        Self::with_config(schema, LintConfig::default())
    }

    /// Create a linter with custom configuration.
    pub fn with_config(schema: Schema, config: LintConfig) -> Self {
        Self { config, schema }
    }

    /// The schema driving this session.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Parse and validate a data file.
    pub fn lint_file(self, path: impl AsRef<Path>) -> Result<LintReport> {
        let parser = Parser::with_config(self.config.parser.clone());
        let (table, source) = parser.parse_file(path)?;
        let mut report = self.lint_table(&table);
        report.source = Some(source);
        Ok(report)
    }

    /// Validate an already-parsed table.
    ///
    /// The header is row 1; data rows are numbered from 2.
    pub fn lint_table(mut self, table: &DataTable) -> LintReport {
        let _span = info_span!("lint", schema = %self.schema.uri()).entered();
        let mut collector = ReportCollector::new(self.config.max_diagnostics);

        collector.record(self.schema.validate_header(&table.headers));

        for (idx, row) in table.rows.iter().enumerate() {
            collector.record(self.schema.validate_record(row, Some(idx + 2)));
        }

        debug!(
            rows = table.row_count(),
            errors = collector.summary.error_count,
            warnings = collector.summary.warning_count,
            "lint complete"
        );

        let mut summary = collector.summary;
        summary.rows_checked = table.row_count();

        LintReport {
            schema_uri: self.schema.uri().to_string(),
            source: None,
            valid: summary.error_count == 0,
            errors: collector.errors,
            warnings: collector.warnings,
            summary,
        }
    }
}

struct ReportCollector {
    limit: Option<usize>,
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    summary: LintSummary,
}

impl ReportCollector {
    fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            errors: Vec::new(),
            warnings: Vec::new(),
            summary: LintSummary::default(),
        }
    }

    fn record(&mut self, diagnostics: Diagnostics) {
        for (severity, diagnostic) in diagnostics.iter() {
            match severity {
                Severity::Error => self.summary.error_count += 1,
                Severity::Warning => self.summary.warning_count += 1,
            }
            *self
                .summary
                .by_kind
                .entry(diagnostic.kind.as_str().to_string())
                .or_insert(0) += 1;

            let recorded = self.errors.len() + self.warnings.len();
            if self.limit.is_some_and(|max| recorded >= max) {
                self.summary.truncated = true;
                continue;
            }
            match severity {
                Severity::Error => self.errors.push(diagnostic.clone()),
                Severity::Warning => self.warnings.push(diagnostic.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Constraints, Field};
    use crate::validation::DiagnosticKind;

    fn table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b',',
        )
    }

    fn id_schema() -> Schema {
        Schema::new(
            "http://example.org/schema.json",
            vec![
                Field::new("id", Constraints::new().required().unique()).unwrap(),
                Field::new("name", Constraints::new().with_max_length(5)).unwrap(),
            ],
        )
    }

    #[test]
    fn test_clean_table() {
        let report = Linter::new(id_schema())
            .lint_table(&table(vec!["id", "name"], vec![vec!["1", "Ann"], vec!["2", "Bob"]]));
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.summary.rows_checked, 2);
        assert_eq!(report.schema_uri, "http://example.org/schema.json");
    }

    #[test]
    fn test_row_numbers_start_after_header() {
        let report = Linter::new(id_schema()).lint_table(&table(
            vec!["id", "name"],
            vec![vec!["1", "Ann"], vec!["1", "Bob"], vec!["", "Caroline"]],
        ));
        assert!(!report.valid);
        let positions: Vec<_> = report
            .errors
            .iter()
            .map(|d| (d.kind, d.row, d.column))
            .collect();
        assert_eq!(
            positions,
            vec![
                (DiagnosticKind::Unique, Some(3), Some(1)),
                (DiagnosticKind::MissingValue, Some(4), Some(1)),
                (DiagnosticKind::MaxLength, Some(4), Some(2)),
            ]
        );
        assert_eq!(report.summary.by_kind.get("unique"), Some(&1));
    }

    #[test]
    fn test_header_diagnostics_included() {
        let report = Linter::new(id_schema())
            .lint_table(&table(vec!["id", "label"], vec![vec!["1", "x"]]));
        assert!(report.valid);
        let kinds: Vec<_> = report.warnings.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::ExtraHeader,
                DiagnosticKind::MissingHeader,
                DiagnosticKind::ExtraColumn,
            ]
        );
    }

    #[test]
    fn test_max_diagnostics_truncates_but_keeps_counts() {
        let config = LintConfig {
            max_diagnostics: Some(1),
            ..Default::default()
        };
        let report = Linter::with_config(id_schema(), config).lint_table(&table(
            vec!["id", "name"],
            vec![vec!["", "x"], vec!["", "y"]],
        ));
        assert!(!report.valid);
        // Two missing values plus the repeated empty id.
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.summary.error_count, 3);
        assert!(report.summary.truncated);
    }
}
