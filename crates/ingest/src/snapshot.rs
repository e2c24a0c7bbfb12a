//! Frozen, normalized copy of an accepted input.
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::field::{Field, FieldValue};
use crate::schema::{FieldKind, FormKind};
use crate::validate::ValidInput;

/// Normalized acknowledgement value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Acknowledgement {
    Yes,
    No,
}

impl Acknowledgement {
    pub fn as_str(self) -> &'static str {
        match self {
            Acknowledgement::Yes => "YES",
            Acknowledgement::No => "NO",
        }
    }
}

impl From<bool> for Acknowledgement {
    fn from(checked: bool) -> Self {
        if checked {
            Acknowledgement::Yes
        } else {
            Acknowledgement::No
        }
    }
}

impl Serialize for Acknowledgement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Acknowledgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotValue {
    Text(String),
    List(Vec<String>),
    Ack(Acknowledgement),
}

impl Serialize for SnapshotValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SnapshotValue::Text(text) => serializer.serialize_str(text),
            SnapshotValue::List(items) => items.serialize(serializer),
            SnapshotValue::Ack(ack) => ack.serialize(serializer),
        }
    }
}

/// Immutable record of exactly what was accepted.
///
/// Every field the schema declares is present, in declaration order. Text is
/// trimmed with line endings folded to `\n`; blank optional fields hold `""`.
/// Selections keep the order in which labels were first picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    kind: FormKind,
    entries: Vec<(Field, SnapshotValue)>,
}

impl Snapshot {
    /// Freezes a validated input. Cannot fail: validation already happened.
    pub fn capture(valid: ValidInput) -> Self {
        let (schema, input) = valid.into_parts();
        let entries = schema
            .fields()
            .map(|spec| {
                let value = match spec.kind {
                    FieldKind::Selection => SnapshotValue::List(
                        input
                            .selection(spec.field)
                            .map(|set| set.as_slice().to_vec())
                            .unwrap_or_default(),
                    ),
                    FieldKind::Acknowledgement => SnapshotValue::Ack(input.flag(spec.field).into()),
                    _ => match input.value(spec.field) {
                        Some(FieldValue::Text(raw)) => SnapshotValue::Text(normalize_text(raw)),
                        _ => SnapshotValue::Text(String::new()),
                    },
                };
                (spec.field, value)
            })
            .collect();
        Self {
            kind: schema.kind,
            entries,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn value(&self, field: Field) -> Option<&SnapshotValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    /// Text of a scalar field; `""` when blank or not part of the form.
    pub fn text(&self, field: Field) -> &str {
        match self.value(field) {
            Some(SnapshotValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Labels of a selection field; empty when none were picked.
    pub fn list(&self, field: Field) -> &[String] {
        match self.value(field) {
            Some(SnapshotValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn ack(&self, field: Field) -> Option<Acknowledgement> {
        match self.value(field) {
            Some(SnapshotValue::Ack(ack)) => Some(*ack),
            _ => None,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (Field, &SnapshotValue)> {
        self.entries.iter().map(|(f, v)| (*f, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

fn normalize_text(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::input::WorkingInput;
    use crate::schema::FormSchema;
    use crate::validate::Validator;

    fn accepted(input: &WorkingInput, schema: &Arc<FormSchema>) -> ValidInput {
        match Validator::new(Arc::clone(schema)).accept(input) {
            Ok(valid) => valid,
            Err(errors) => panic!("input should validate: {errors:?}"),
        }
    }

    fn filled_discovery(schema: &FormSchema) -> WorkingInput {
        let mut input = WorkingInput::new(FormKind::Discovery);
        let texts = [
            (Field::FromName, "  Jane Doe  "),
            (Field::UserEmail, "jane@biz.com"),
            (Field::Timezone, "America/Chicago"),
            (Field::ProjectName, "Ocean Café Site"),
            (Field::ProjectSummary, "A new site for the café\r\nwith online menu."),
            (Field::BudgetRange, "$1,500–$2,500"),
            (Field::Availability, "Flexible / as needed"),
            (Field::Signature, "Jane Doe"),
            (Field::SignedDate, "2026-01-10"),
        ];
        for (field, value) in texts {
            input.set_text(schema, field, value).expect("edit");
        }
        for (field, label) in [
            (Field::ProjectTypes, "Website"),
            (Field::ProjectTypes, "Automation"),
            (Field::Goals, "Lead generation"),
            (Field::Services, "Custom website"),
        ] {
            input.toggle(schema, field, label).expect("toggle");
        }
        for field in [Field::AckPaid, Field::AckNoDev, Field::AckScope] {
            input.set_flag(schema, field, true).expect("ack");
        }
        input
    }

    #[test]
    fn capture_covers_every_schema_field() {
        let schema = Arc::new(FormSchema::discovery());
        let snapshot = Snapshot::capture(accepted(&filled_discovery(&schema), &schema));

        assert_eq!(snapshot.len(), schema.fields().count());
        for (spec, (field, _)) in schema.fields().zip(snapshot.entries()) {
            assert_eq!(spec.field, field);
        }
    }

    #[test]
    fn capture_normalizes_values() {
        let schema = Arc::new(FormSchema::discovery());
        let snapshot = Snapshot::capture(accepted(&filled_discovery(&schema), &schema));

        assert_eq!(snapshot.text(Field::FromName), "Jane Doe");
        assert_eq!(
            snapshot.text(Field::ProjectSummary),
            "A new site for the café\nwith online menu."
        );
        assert_eq!(snapshot.text(Field::Company), "");
        assert_eq!(snapshot.list(Field::ProjectTypes), ["Website", "Automation"]);
        assert_eq!(snapshot.ack(Field::AckPaid), Some(Acknowledgement::Yes));
        assert_eq!(snapshot.text(Field::BillingModel), "");
    }

    #[test]
    fn snapshot_is_detached_from_later_edits() {
        let schema = Arc::new(FormSchema::discovery());
        let mut input = filled_discovery(&schema);
        let snapshot = Snapshot::capture(accepted(&input, &schema));

        input.set_text(&schema, Field::FromName, "Someone Else").expect("edit");
        input.toggle(&schema, Field::Goals, "Increase sales").expect("toggle");

        assert_eq!(snapshot.text(Field::FromName), "Jane Doe");
        assert_eq!(snapshot.list(Field::Goals), ["Lead generation"]);
    }

    #[test]
    fn snapshot_serializes_as_ordered_map() {
        let schema = Arc::new(FormSchema::discovery());
        let snapshot = Snapshot::capture(accepted(&filled_discovery(&schema), &schema));
        let value = serde_json::to_value(&snapshot).expect("serialize");

        assert_eq!(value["from_name"], "Jane Doe");
        assert_eq!(value["ack_scope"], "YES");
        assert_eq!(value["goals_selected"][0], "Lead generation");
    }

    #[test]
    fn acknowledgement_serializes_as_display_text() {
        assert_eq!(
            serde_json::to_string(&Some(Acknowledgement::Yes)).expect("serialize"),
            "\"YES\""
        );
        assert_eq!(
            serde_json::to_string(&Acknowledgement::from(false)).expect("serialize"),
            "\"NO\""
        );
    }
}
