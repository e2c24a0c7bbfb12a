//! Deterministic text renditions of a snapshot.
//!
//! Two texts come out of one snapshot: the client acknowledgement (from
//! [`ClientNote`]) and the internal record, which lists every schema field
//! under its section title. Lines are joined with `\n` and there is no
//! trailing newline. Blank fields keep their line (`Label: ` or an empty line
//! under a `Label:` block header) so the line structure only depends on the
//! schema and on line breaks inside long-text answers.
//!
//! ```text
//! === DISCOVERY INTAKE (Internal Record) ===
//! Submission ID: DISC-20260110-7QX2MB
//!
//! [Client]
//! Name: Jane Doe
//! ...
//!
//! [Project]
//! Project Name: Ocean Café Site
//! ...
//! Project Summary:
//! A new site for the café with online menu.
//! ```
use std::sync::Arc;

use ingest::{FieldKind, FormKind, FormSchema, Snapshot, SnapshotValue};
use serde::Serialize;

use crate::id::SubmissionId;
use crate::note::ClientNote;

/// Rendering of an empty selection.
pub const EMPTY_SELECTION: &str = "(none)";
pub const SELECTION_SEPARATOR: &str = ", ";

/// The pair of texts dispatched for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalTexts {
    pub client: String,
    pub internal: String,
}

#[derive(Debug, Clone)]
pub struct TextBuilder {
    schema: Arc<FormSchema>,
    note: ClientNote,
}

impl TextBuilder {
    pub fn new(schema: Arc<FormSchema>, note: ClientNote) -> Self {
        Self { schema, note }
    }

    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    pub fn render(&self, snapshot: &Snapshot, id: &SubmissionId) -> CanonicalTexts {
        CanonicalTexts {
            client: self.client_text(snapshot),
            internal: self.internal_text(snapshot, id),
        }
    }

    /// Acknowledgement text; depends on the snapshot alone.
    pub fn client_text(&self, snapshot: &Snapshot) -> String {
        self.note.lines(snapshot).join("\n")
    }

    pub fn internal_text(&self, snapshot: &Snapshot, id: &SubmissionId) -> String {
        let mut lines = vec![
            internal_header(self.schema.kind).to_string(),
            format!("Submission ID: {id}"),
        ];
        for section in &self.schema.sections {
            lines.push(String::new());
            lines.push(format!("[{}]", section.title));
            for spec in &section.fields {
                let value = display_value(snapshot.value(spec.field));
                if spec.kind == FieldKind::LongText {
                    lines.push(format!("{}:", spec.label));
                    lines.push(value);
                } else {
                    lines.push(format!("{}: {}", spec.label, value));
                }
            }
        }
        lines.join("\n")
    }
}

pub fn internal_header(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Discovery => "=== DISCOVERY INTAKE (Internal Record) ===",
        FormKind::ScopeOfWork => "=== SCOPE OF WORK (Internal Record) ===",
    }
}

/// Joins selected labels in stored order, or `(none)`.
pub fn join_selection(items: &[String]) -> String {
    if items.is_empty() {
        EMPTY_SELECTION.to_string()
    } else {
        items.join(SELECTION_SEPARATOR)
    }
}

fn display_value(value: Option<&SnapshotValue>) -> String {
    match value {
        Some(SnapshotValue::Text(text)) => text.clone(),
        Some(SnapshotValue::List(items)) => join_selection(items),
        Some(SnapshotValue::Ack(ack)) => ack.as_str().to_string(),
        None => String::new(),
    }
}
