//! Diagnostics produced while validating headers and rows.

mod diagnostic;

pub use diagnostic::{Category, Diagnostic, DiagnosticKind, Diagnostics, Severity};
