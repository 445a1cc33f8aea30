use super::{DataType, Document, Value};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub optional: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn validate(&self, value: &Value) -> Option<FieldViolation> {
        if !self.data_type.is_compatible(value) {
            return Some(FieldViolation {
                field: self.name.clone(),
                kind: ViolationKind::TypeMismatch {
                    expected: self.data_type,
                    found: value.type_name(),
                },
            });
        }

        if !self.optional && value.is_blank() {
            return Some(FieldViolation {
                field: self.name.clone(),
                kind: ViolationKind::Required,
            });
        }

        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Required,
    TypeMismatch {
        expected: DataType,
        found: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Required => write!(f, "{} is required", self.field),
            ViolationKind::TypeMismatch { expected, found } => {
                write!(f, "{} expects {}, got {}", self.field, expected, found)
            }
        }
    }
}

/// Outcome of validating one document: the list of field/violation pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn violation_for(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Field-level validator bound to one document type.
///
/// Follows a two-step contract: `clean` normalizes a document (trims text,
/// drops blank optionals and blank list entries), then `validate` reports
/// every violation at once.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn clean<D: Document>(&self, mut doc: D) -> D {
        doc.clean();
        doc
    }

    pub fn validate<D: Document>(&self, doc: &D) -> ValidationReport {
        let violations = self
            .fields
            .iter()
            .filter_map(|field| field.validate(&doc.field(&field.name)))
            .collect();
        ValidationReport { violations }
    }

    /// A stateful context for form-style flows: reset, validate, then inspect.
    pub fn named_context(&self, name: impl Into<String>) -> ValidationContext {
        ValidationContext {
            name: name.into(),
            schema: self.clone(),
            report: ValidationReport::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationContext {
    name: String,
    schema: Schema,
    report: ValidationReport,
}

impl ValidationContext {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reset(&mut self) {
        self.report = ValidationReport::default();
    }

    pub fn validate<D: Document>(&mut self, doc: &D) -> bool {
        self.report = self.schema.validate(doc);
        self.report.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        self.report.violations()
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }
}

// ============================================================================
// Cleaning helpers used by Document::clean implementations
// ============================================================================

pub fn clean_text(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub fn clean_optional(value: &mut Option<String>) {
    if let Some(text) = value.as_mut() {
        clean_text(text);
        if text.is_empty() {
            *value = None;
        }
    }
}

/// Trims entries, drops blanks and repeated entries, keeps first-seen order.
pub fn clean_list(values: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    let mut cleaned = Vec::with_capacity(values.len());
    for value in values.drain(..) {
        let trimmed = value.trim().to_string();
        if !trimmed.is_empty() && seen.insert(trimmed.clone()) {
            cleaned.push(trimmed);
        }
    }
    *values = cleaned;
}
