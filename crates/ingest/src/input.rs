//! The mutable working input owned by one form session.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::field::{Field, FieldValue, SelectionSet};
use crate::schema::{FieldKind, FieldSpec, FormKind, FormSchema};

/// Everything the user has typed, toggled, or checked so far.
///
/// Values are stored raw: trimming and normalization happen when a
/// [`Snapshot`](crate::Snapshot) is captured. Checked edits go through the
/// `set_*`/`toggle` methods, which consult the form's schema; a deserialized
/// input should be passed through [`WorkingInput::conform`] before use.
///
/// The JSON shape is `{"form": "discovery", "confirm_email": "", "fields": {...}}`,
/// where `confirm_email` is the hidden decoy field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingInput {
    #[serde(rename = "form")]
    kind: FormKind,
    #[serde(rename = "confirm_email", default)]
    decoy: String,
    #[serde(default)]
    fields: BTreeMap<Field, FieldValue>,
}

impl WorkingInput {
    /// An empty input for `kind`.
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            decoy: String::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Pre-fills the signed date, as a fresh session does with "today".
    pub fn with_signed_date(mut self, today: NaiveDate) -> Self {
        self.fields.insert(
            Field::SignedDate,
            FieldValue::Text(today.format("%Y-%m-%d").to_string()),
        );
        self
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Writes a text, date, or choice field.
    pub fn set_text(
        &mut self,
        schema: &FormSchema,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), IngestError> {
        let spec = self.lookup(schema, field)?;
        if !spec.kind.is_textual() {
            return Err(IngestError::KindMismatch {
                field,
                expected: spec.kind,
            });
        }
        self.fields.insert(field, FieldValue::Text(value.into()));
        Ok(())
    }

    /// Flips one catalog label of a selection field. Returns whether the label
    /// is selected afterwards.
    pub fn toggle(
        &mut self,
        schema: &FormSchema,
        field: Field,
        label: &str,
    ) -> Result<bool, IngestError> {
        let spec = self.lookup(schema, field)?;
        if spec.kind != FieldKind::Selection {
            return Err(IngestError::KindMismatch {
                field,
                expected: spec.kind,
            });
        }
        if !spec.allows(label) {
            return Err(IngestError::UnknownOption {
                field,
                label: label.to_string(),
            });
        }
        let entry = self
            .fields
            .entry(field)
            .or_insert_with(|| FieldValue::Selection(SelectionSet::new()));
        match entry {
            FieldValue::Selection(set) => Ok(set.toggle(label)),
            other => {
                let mut set = SelectionSet::new();
                set.insert(label);
                *other = FieldValue::Selection(set);
                Ok(true)
            }
        }
    }

    /// Checks or unchecks an acknowledgement.
    pub fn set_flag(
        &mut self,
        schema: &FormSchema,
        field: Field,
        checked: bool,
    ) -> Result<(), IngestError> {
        let spec = self.lookup(schema, field)?;
        if spec.kind != FieldKind::Acknowledgement {
            return Err(IngestError::KindMismatch {
                field,
                expected: spec.kind,
            });
        }
        self.fields.insert(field, FieldValue::Flag(checked));
        Ok(())
    }

    /// Writes the hidden decoy field. Humans never see it.
    pub fn set_decoy(&mut self, value: impl Into<String>) {
        self.decoy = value.into();
    }

    /// Checks a deserialized input against `schema`: every stored field must
    /// be declared, hold a value of the declared shape, and selections may only
    /// carry catalog labels.
    pub fn conform(&self, schema: &FormSchema) -> Result<(), IngestError> {
        if self.kind != schema.kind {
            return Err(IngestError::FormMismatch {
                expected: schema.kind,
                found: self.kind,
            });
        }
        for (field, value) in &self.fields {
            let spec = self.lookup(schema, *field)?;
            let shape_ok = match value {
                FieldValue::Text(_) => spec.kind.is_textual(),
                FieldValue::Selection(_) => spec.kind == FieldKind::Selection,
                FieldValue::Flag(_) => spec.kind == FieldKind::Acknowledgement,
            };
            if !shape_ok {
                return Err(IngestError::KindMismatch {
                    field: *field,
                    expected: spec.kind,
                });
            }
            if let FieldValue::Selection(set) = value {
                if let Some(label) = set.as_slice().iter().find(|l| !spec.allows(l)) {
                    return Err(IngestError::UnknownOption {
                        field: *field,
                        label: label.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn value(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Raw text of a field, or `""` when unset or not textual.
    pub fn text(&self, field: Field) -> &str {
        match self.fields.get(&field) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn selection(&self, field: Field) -> Option<&SelectionSet> {
        match self.fields.get(&field) {
            Some(FieldValue::Selection(set)) => Some(set),
            _ => None,
        }
    }

    pub fn flag(&self, field: Field) -> bool {
        matches!(self.fields.get(&field), Some(FieldValue::Flag(true)))
    }

    pub fn decoy(&self) -> &str {
        &self.decoy
    }

    fn lookup<'s>(&self, schema: &'s FormSchema, field: Field) -> Result<&'s FieldSpec, IngestError> {
        if schema.kind != self.kind {
            return Err(IngestError::UnknownField {
                form: schema.kind,
                field,
            });
        }
        schema.spec(field).ok_or(IngestError::UnknownField {
            form: self.kind,
            field,
        })
    }
}
