//! Table validator: aligns headers and rows against the declared columns.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::validation::{DiagnosticKind, Diagnostics};

use super::field::Field;

/// Schema for an entire table.
///
/// One `Schema` drives one validation session: call
/// [`validate_header`](Schema::validate_header) once, then
/// [`validate_row`](Schema::validate_row) for each data row in order.
#[derive(Debug, Clone)]
pub struct Schema {
    uri: String,
    title: Option<String>,
    description: Option<String>,
    /// Declared columns, in declaration order.
    fields: Vec<Field>,
    /// Header position -> index into `fields`. Never maps two positions to
    /// the same field.
    mapping: IndexMap<usize, usize>,
}

impl Schema {
    /// Create a schema with the given columns.
    pub fn new(uri: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            uri: uri.into(),
            title: None,
            description: None,
            fields,
            mapping: IndexMap::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get a column by name, case-insensitively.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.matches_name(name))
    }

    /// Header position -> declared column index, as established by the last
    /// call to `validate_header`.
    pub fn mapping(&self) -> &IndexMap<usize, usize> {
        &self.mapping
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name()).collect()
    }

    /// Get the number of declared columns.
    pub fn column_count(&self) -> usize {
        self.fields.len()
    }

    /// Align an observed header against the declared columns.
    ///
    /// Names match case-insensitively; the first declared column with a
    /// matching name that is not already mapped wins. Replaces any mapping
    /// from a previous call.
    pub fn validate_header<S: AsRef<str>>(&mut self, header: &[S]) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        self.mapping.clear();

        for (i, name) in header.iter().enumerate() {
            let name = name.as_ref();
            let matched = self
                .fields
                .iter()
                .enumerate()
                .position(|(idx, f)| f.matches_name(name) && !self.is_mapped(idx));

            match matched {
                Some(idx) => {
                    self.mapping.insert(i, idx);
                    // Compared against the column declared at this position,
                    // not the matched column.
                    if self.fields.get(i).is_some_and(|f| f.name() != name) {
                        diagnostics.add_warning(
                            DiagnosticKind::DifferentIndexHeader,
                            None,
                            Some(i + 1),
                            Some(name.to_string()),
                        );
                    }
                }
                None => match self.fields.get(i) {
                    Some(declared) if declared.is_required() => {
                        diagnostics.add_error(
                            DiagnosticKind::MissingHeader,
                            None,
                            Some(i + 1),
                            Some(declared.name().to_string()),
                        );
                    }
                    _ => {
                        diagnostics.add_warning(
                            DiagnosticKind::ExtraHeader,
                            None,
                            Some(i + 1),
                            Some(name.to_string()),
                        );
                    }
                },
            }
        }

        for (idx, field) in self.fields.iter().enumerate() {
            if !self.is_mapped(idx) {
                diagnostics.add_warning(
                    DiagnosticKind::MissingHeader,
                    None,
                    Some(idx + 1),
                    Some(field.name().to_string()),
                );
            }
        }

        debug!(
            schema = %self.uri,
            mapped = self.mapping.len(),
            declared = self.fields.len(),
            errors = diagnostics.errors().len(),
            warnings = diagnostics.warnings().len(),
            "validated header"
        );

        diagnostics
    }

    /// Validate one data row using the mapping from `validate_header`.
    ///
    /// `None` entries are absent values. A short row only yields
    /// `missing_column` warnings and extra values only `extra_column`
    /// warnings; neither makes the row invalid on its own.
    pub fn validate_row<S: AsRef<str>>(
        &mut self,
        values: &[Option<S>],
        row: Option<usize>,
    ) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        let width = self
            .mapping
            .keys()
            .map(|i| i + 1)
            .max()
            .unwrap_or(0)
            .max(values.len());
        let slots: Vec<Option<&str>> = (0..width)
            .map(|i| values.get(i).and_then(|v| v.as_ref()).map(|s| s.as_ref()))
            .collect();

        for (i, slot) in slots.iter().enumerate() {
            match self.mapping.get(&i) {
                Some(&idx) => {
                    let result =
                        self.fields[idx].validate_column(Some(slot.unwrap_or("")), row, Some(i + 1));
                    diagnostics.extend(result);
                }
                None => {
                    diagnostics.add_warning(DiagnosticKind::ExtraColumn, row, Some(i + 1), None);
                }
            }
        }

        for (idx, field) in self.fields.iter().enumerate() {
            let position = self.position_of(idx).unwrap_or(idx);
            if slots.get(position).copied().flatten().is_none() {
                diagnostics.add_warning(
                    DiagnosticKind::MissingColumn,
                    row,
                    Some(position + 1),
                    Some(field.name().to_string()),
                );
            }
        }

        trace!(
            row = ?row,
            values = values.len(),
            errors = diagnostics.errors().len(),
            warnings = diagnostics.warnings().len(),
            "validated row"
        );

        diagnostics
    }

    /// Validate a row in which every value is present.
    pub fn validate_record<S: AsRef<str>>(&mut self, values: &[S], row: Option<usize>) -> Diagnostics {
        let values: Vec<Option<&str>> = values.iter().map(|v| Some(v.as_ref())).collect();
        self.validate_row(&values, row)
    }

    fn is_mapped(&self, field_idx: usize) -> bool {
        self.mapping.values().any(|&idx| idx == field_idx)
    }

    fn position_of(&self, field_idx: usize) -> Option<usize> {
        self.mapping
            .iter()
            .find(|(_, idx)| **idx == field_idx)
            .map(|(position, _)| *position)
    }
}
