//! Column validator: checks one column's values against its constraints.

use std::collections::HashSet;

use regex::Regex;
use tracing::warn;

use crate::error::Result;
use crate::validation::{DiagnosticKind, Diagnostics};

use super::types::{Constraints, FieldType, TypeCheck};

/// A declared column and the state of one validation session for it.
///
/// The set of values seen so far only grows; a `Field` belongs to a single
/// session and should be discarded afterwards.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    title: Option<String>,
    description: Option<String>,
    constraints: Constraints,
    pattern: Option<Regex>,
    field_type: Option<FieldType>,
    seen: HashSet<Option<String>>,
}

impl Field {
    /// Create a column validator, compiling its `pattern` constraint.
    pub fn new(name: impl Into<String>, constraints: Constraints) -> Result<Self> {
        let name = name.into();
        let pattern = constraints.pattern.as_deref().map(Regex::new).transpose()?;

        let field_type = constraints.type_uri.as_deref().and_then(|uri| {
            let resolved = FieldType::from_uri(uri);
            if resolved.is_none() {
                warn!(column = %name, type_uri = uri, "unrecognized type identifier, type check disabled");
            }
            resolved
        });

        Ok(Self {
            name,
            title: None,
            description: None,
            constraints,
            pattern,
            field_type,
            seen: HashSet::new(),
        })
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// The resolved datatype, if the type identifier was recognized.
    pub fn field_type(&self) -> Option<FieldType> {
        self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.constraints.required
    }

    /// Number of distinct values recorded for the `unique` check.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Case-insensitive name comparison used for header matching.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Validate one observed value.
    ///
    /// Every configured constraint is evaluated, in a fixed order, and each
    /// adds at most one error. `row` and `column` are 1-based and only used
    /// to position the diagnostics.
    pub fn validate_column(
        &mut self,
        value: Option<&str>,
        row: Option<usize>,
        column: Option<usize>,
    ) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let length = value.map(|v| v.chars().count());

        if self.constraints.required && value.is_none_or(str::is_empty) {
            diagnostics.add_error(DiagnosticKind::MissingValue, row, column, None);
        }

        if let Some(min) = self.constraints.min_length {
            if length.is_none_or(|len| len < min) {
                diagnostics.add_error(DiagnosticKind::MinLength, row, column, None);
            }
        }

        if let Some(max) = self.constraints.max_length {
            if length.is_some_and(|len| len > max) {
                diagnostics.add_error(DiagnosticKind::MaxLength, row, column, None);
            }
        }

        if let (Some(pattern), Some(v)) = (&self.pattern, value) {
            if !pattern.is_match(v) {
                diagnostics.add_error(DiagnosticKind::Pattern, row, column, None);
            }
        }

        // Recorded even when earlier constraints failed.
        if self.constraints.unique && !self.seen.insert(value.map(str::to_string)) {
            diagnostics.add_error(DiagnosticKind::Unique, row, column, None);
        }

        if let Some(field_type) = self.field_type {
            let check = value.map_or(TypeCheck::ConversionFailed, |v| field_type.check(v));
            if !check.is_valid() {
                diagnostics.add_error(DiagnosticKind::InvalidType, row, column, None);
            }
        }

        diagnostics
    }
}
