//! Schema-driven field validation.
//!
//! [`Validator::validate`] evaluates every field of the schema and collects
//! all failures; it never stops at the first one. [`Validator::accept`] is the
//! only way to obtain a [`ValidInput`], which in turn is the only way to
//! capture a [`Snapshot`](crate::Snapshot).
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::field::{Field, FieldValue};
use crate::input::WorkingInput;
use crate::schema::{FieldKind, FieldSpec, FormSchema, Rule, OTHER_OPTION};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"));

const INVALID_DATE: &str = "Enter a valid date (YYYY-MM-DD).";
const INVALID_CHOICE: &str = "Choose one of the listed options.";
const INVALID_SELECTION: &str = "Select only listed options.";
const UNEXPECTED_VALUE: &str = "Unexpected value.";

/// Field-to-message map in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: Vec<(Field, String)>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: Field, message: String) {
        if self.get(field).is_none() {
            self.entries.push((field, message));
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    /// Drops the entry for `field`, as happens when the user edits it.
    /// Returns whether an entry was present.
    pub fn clear(&mut self, field: Field) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(f, _)| *f != field);
        before != self.entries.len()
    }

    /// First failing field in declaration order; the focus target.
    pub fn first(&self) -> Option<Field> {
        self.entries.first().map(|(f, _)| *f)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field.name(), message)?;
        }
        map.end()
    }
}

/// Proof that an input passed validation against a schema.
///
/// Cannot be built outside this crate except through [`Validator::accept`].
#[derive(Debug, Clone)]
pub struct ValidInput {
    schema: Arc<FormSchema>,
    input: WorkingInput,
}

impl ValidInput {
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn input(&self) -> &WorkingInput {
        &self.input
    }

    pub(crate) fn into_parts(self) -> (Arc<FormSchema>, WorkingInput) {
        (self.schema, self.input)
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    schema: Arc<FormSchema>,
}

impl Validator {
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    /// Evaluates every field and returns all failures.
    pub fn validate(&self, input: &WorkingInput) -> ErrorMap {
        let mut errors = ErrorMap::new();
        for spec in self.schema.fields() {
            if let Some(message) = check_field(spec, input) {
                errors.push(spec.field, message);
            }
        }
        errors
    }

    /// Validates and, on success, hands back the witness needed for a snapshot.
    pub fn accept(&self, input: &WorkingInput) -> Result<ValidInput, ErrorMap> {
        let start = Instant::now();
        let errors = self.validate(input);
        let elapsed_micros = start.elapsed().as_micros();
        if errors.is_empty() {
            debug!(form = %self.schema.kind, elapsed_micros, "validation_passed");
            Ok(ValidInput {
                schema: Arc::clone(&self.schema),
                input: input.clone(),
            })
        } else {
            debug!(
                form = %self.schema.kind,
                error_count = errors.len(),
                elapsed_micros,
                "validation_rejected"
            );
            Err(errors)
        }
    }
}

fn check_field(spec: &FieldSpec, input: &WorkingInput) -> Option<String> {
    match spec.kind {
        FieldKind::Selection => check_selection(spec, input),
        FieldKind::Acknowledgement => check_flag(spec, input),
        _ => check_text(spec, input),
    }
}

fn check_text(spec: &FieldSpec, input: &WorkingInput) -> Option<String> {
    let raw = match input.value(spec.field) {
        None => "",
        Some(FieldValue::Text(text)) => text.as_str(),
        Some(_) => return Some(UNEXPECTED_VALUE.to_string()),
    };
    let value = raw.trim();

    let rule_failed = match spec.rule {
        Rule::Optional => false,
        Rule::Required => value.is_empty(),
        Rule::MinLength(min) => value.chars().count() < min,
        Rule::Email => !EMAIL.is_match(value),
        Rule::RequiredIfOther(companion) => other_selected(input, companion) && value.is_empty(),
    };
    if rule_failed {
        return Some(spec.message.clone());
    }

    if value.is_empty() {
        return None;
    }
    match spec.kind {
        FieldKind::Date if !is_calendar_date(value) => Some(INVALID_DATE.to_string()),
        FieldKind::Choice if !spec.allows(value) => Some(INVALID_CHOICE.to_string()),
        _ => None,
    }
}

fn check_selection(spec: &FieldSpec, input: &WorkingInput) -> Option<String> {
    let labels: &[String] = match input.value(spec.field) {
        None => &[],
        Some(FieldValue::Selection(set)) => set.as_slice(),
        Some(_) => return Some(UNEXPECTED_VALUE.to_string()),
    };
    if spec.rule == Rule::Required && labels.is_empty() {
        return Some(spec.message.clone());
    }
    if labels.iter().any(|label| !spec.allows(label)) {
        return Some(INVALID_SELECTION.to_string());
    }
    None
}

fn check_flag(spec: &FieldSpec, input: &WorkingInput) -> Option<String> {
    let checked = match input.value(spec.field) {
        None => false,
        Some(FieldValue::Flag(checked)) => *checked,
        Some(_) => return Some(UNEXPECTED_VALUE.to_string()),
    };
    if spec.rule == Rule::Required && !checked {
        return Some(spec.message.clone());
    }
    None
}

fn other_selected(input: &WorkingInput, companion: Field) -> bool {
    match input.value(companion) {
        Some(FieldValue::Text(text)) => text.trim() == OTHER_OPTION,
        Some(FieldValue::Selection(set)) => set.contains(OTHER_OPTION),
        _ => false,
    }
}

/// Strict `YYYY-MM-DD`: chrono alone accepts unpadded months and days.
fn is_calendar_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
