//! csvlint: schema-driven validation for CSV and other tabular data.
//!
//! A [`Schema`] declares the expected columns of a table together with
//! per-column constraints (`required`, length bounds, `pattern`, `unique`)
//! and an optional datatype. Validation happens in two steps: the header is
//! aligned against the declared columns once, then every data row is
//! checked against that alignment. Findings are returned as
//! [`Diagnostics`]: errors make a table invalid, warnings never do.
//!
//! # Example
//!
//! ```no_run
//! use csvlint::{Linter, Schema};
//!
//! let schema = Schema::fetch("http://example.com/schema.json").unwrap();
//! let report = Linter::new(schema).lint_file("houses.csv").unwrap();
//!
//! println!("Valid: {}", report.valid);
//! println!("Errors: {}", report.errors.len());
//! ```

pub mod error;
pub mod input;
pub mod schema;
pub mod validation;

mod linter;

pub use error::{CsvlintError, Result};
pub use input::{DataTable, SourceMetadata};
pub use linter::{LintConfig, LintReport, LintSummary, Linter};
pub use schema::{Constraints, Field, FieldType, Schema, SchemaDocument};
pub use validation::{Category, Diagnostic, DiagnosticKind, Diagnostics, Severity};
