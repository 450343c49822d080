//! Diagnostic types and the per-call diagnostic record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of problem found while validating a header or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A required value is empty or absent.
    MissingValue,
    /// Value shorter than `minLength`.
    MinLength,
    /// Value longer than `maxLength`.
    MaxLength,
    /// Value does not match `pattern`.
    Pattern,
    /// Value already seen in a `unique` column.
    Unique,
    /// Value does not convert to, or violates, the declared type.
    InvalidType,
    /// A declared column has no header. Error when the column is required.
    MissingHeader,
    /// Header matched by name, but the column declared at that position differs.
    DifferentIndexHeader,
    /// Header name not declared in the schema.
    ExtraHeader,
    /// Row value at a position with no mapped column.
    ExtraColumn,
    /// Row has no value for a declared column.
    MissingColumn,
}

impl DiagnosticKind {
    /// Get a human-readable label for the diagnostic kind.
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingValue => "Missing value",
            DiagnosticKind::MinLength => "Value too short",
            DiagnosticKind::MaxLength => "Value too long",
            DiagnosticKind::Pattern => "Pattern mismatch",
            DiagnosticKind::Unique => "Duplicate value",
            DiagnosticKind::InvalidType => "Invalid type",
            DiagnosticKind::MissingHeader => "Missing header",
            DiagnosticKind::DifferentIndexHeader => "Header out of position",
            DiagnosticKind::ExtraHeader => "Unexpected header",
            DiagnosticKind::ExtraColumn => "Unexpected column",
            DiagnosticKind::MissingColumn => "Missing column",
        }
    }

    /// The snake_case identifier used in serialized reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingValue => "missing_value",
            DiagnosticKind::MinLength => "min_length",
            DiagnosticKind::MaxLength => "max_length",
            DiagnosticKind::Pattern => "pattern",
            DiagnosticKind::Unique => "unique",
            DiagnosticKind::InvalidType => "invalid_type",
            DiagnosticKind::MissingHeader => "missing_header",
            DiagnosticKind::DifferentIndexHeader => "different_index_header",
            DiagnosticKind::ExtraHeader => "extra_header",
            DiagnosticKind::ExtraColumn => "extra_column",
            DiagnosticKind::MissingColumn => "missing_column",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of a diagnostic. Everything raised by the schema engine is `Schema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Schema,
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; never affects validity.
    Warning,
    /// Makes the header or row invalid.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// A single positioned finding.
///
/// Row and column numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Diagnostic {
    /// Create a schema diagnostic.
    pub fn new(
        kind: DiagnosticKind,
        row: Option<usize>,
        column: Option<usize>,
        content: Option<String>,
    ) -> Self {
        Self {
            kind,
            category: Category::Schema,
            row,
            column,
            content,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.label())?;
        match (self.row, self.column) {
            (Some(row), Some(column)) => write!(f, " at row {}, column {}", row, column)?,
            (Some(row), None) => write!(f, " at row {}", row)?,
            (None, Some(column)) => write!(f, " at column {}", column)?,
            (None, None) => {}
        }
        if let Some(ref content) = self.content {
            write!(f, ": {:?}", content)?;
        }
        Ok(())
    }
}

/// Ordered errors and warnings produced by one validation call.
///
/// No deduplication: every call to `add_error`/`add_warning` appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both sequences.
    pub fn reset(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }

    /// Append an error.
    pub fn add_error(
        &mut self,
        kind: DiagnosticKind,
        row: Option<usize>,
        column: Option<usize>,
        content: Option<String>,
    ) {
        self.errors.push(Diagnostic::new(kind, row, column, content));
    }

    /// Append a warning.
    pub fn add_warning(
        &mut self,
        kind: DiagnosticKind,
        row: Option<usize>,
        column: Option<usize>,
        content: Option<String>,
    ) {
        self.warnings.push(Diagnostic::new(kind, row, column, content));
    }

    /// True iff no error has been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Append another record's errors and warnings, preserving order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Total number of diagnostics of either severity.
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Iterate over all diagnostics with their severity, errors first.
    pub fn iter(&self) -> impl Iterator<Item = (Severity, &Diagnostic)> {
        self.errors
            .iter()
            .map(|d| (Severity::Error, d))
            .chain(self.warnings.iter().map(|d| (Severity::Warning, d)))
    }

    /// Split into the owned error and warning sequences.
    pub fn into_parts(self) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
        (self.errors, self.warnings)
    }
}
