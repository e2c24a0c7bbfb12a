use std::sync::Arc;
use std::time::Instant;

use canonical::SubmissionRecord;
use chrono::NaiveDate;
use ingest::{FieldKind, FieldSpec, FormKind, FormSchema, Snapshot, SnapshotValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::html::to_html;
use crate::model::{Document, Header, Row, SectionBlock, Variant, BLANK_RULE};
use crate::paginate::paginate;
use crate::plain::to_text;

pub const WATERMARK: &str = "SUBMITTED COPY";
pub const PROVENANCE: &str =
    "This document was generated from the same values sent to the notification channel.";

/// Body lines kept free under a long-text label.
const FILLED_TEXT_RESERVE: usize = 3;
const BLANK_TEXT_RESERVE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum estimated lines per page.
    pub lines_per_page: usize,
    /// Hex digits shown in the header before `...`.
    pub hash_preview_chars: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lines_per_page: 60,
            hash_preview_chars: 28,
        }
    }
}

/// A rendered document ready to hand to an exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub container_id: String,
    pub filename: String,
    pub html: String,
    pub text: String,
    pub pages: usize,
}

/// Builds submitted-copy and blank-template documents for one form.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    schema: Arc<FormSchema>,
    layout: LayoutConfig,
}

impl DocumentRenderer {
    pub fn new(schema: Arc<FormSchema>, layout: LayoutConfig) -> Self {
        Self { schema, layout }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Document model of the submitted copy.
    pub fn filled_document(&self, snapshot: &Snapshot, record: &SubmissionRecord) -> Document {
        let kind = self.schema.kind;
        let mut sections: Vec<SectionBlock> = self
            .schema
            .sections
            .iter()
            .map(|section| {
                let rows = section
                    .fields
                    .iter()
                    .map(|spec| filled_row(spec, snapshot.value(spec.field)))
                    .collect();
                SectionBlock::new(section.title.as_str(), rows)
            })
            .collect();
        sections.push(SectionBlock::new(
            "Integrity",
            vec![
                Row::Field {
                    label: "Submission ID".into(),
                    value: record.id().to_string(),
                },
                Row::Field {
                    label: "Full Submission Hash".into(),
                    value: record.fingerprint().to_string(),
                },
                Row::Field {
                    label: "Integrity Proof".into(),
                    value: PROVENANCE.into(),
                },
            ],
        ));

        let header = Header {
            title: format!("{} (Submitted Copy)", kind.title()),
            meta: vec![
                ("Submission ID".into(), record.id().to_string()),
                (
                    "Hash (short)".into(),
                    record.fingerprint().preview(self.layout.hash_preview_chars),
                ),
            ],
        };
        self.assemble(Variant::Filled, header, Some(WATERMARK.into()), sections)
    }

    /// Document model of the printable blank form.
    pub fn blank_document(&self, date: NaiveDate) -> Document {
        let sections = self
            .schema
            .sections
            .iter()
            .map(|section| {
                SectionBlock::new(
                    section.title.as_str(),
                    section.fields.iter().map(blank_row).collect(),
                )
            })
            .collect();
        let header = Header {
            title: format!("{} Form", self.schema.kind.title()),
            meta: vec![
                ("Date".into(), date.format("%Y-%m-%d").to_string()),
                ("Submission ID".into(), BLANK_RULE.into()),
            ],
        };
        self.assemble(Variant::Blank, header, None, sections)
    }

    /// Renders the submitted copy. Same inputs always give identical bytes.
    pub fn render_filled(&self, snapshot: &Snapshot, record: &SubmissionRecord) -> RenderedDocument {
        let start = Instant::now();
        let doc = self.filled_document(snapshot, record);
        let filename = filled_filename(self.schema.kind, record);
        let rendered = finish(doc, filename);
        debug!(
            submission_id = %record.id(),
            pages = rendered.pages,
            elapsed_micros = start.elapsed().as_micros(),
            "document_rendered"
        );
        rendered
    }

    pub fn render_blank(&self, date: NaiveDate) -> RenderedDocument {
        let doc = self.blank_document(date);
        finish(doc, blank_filename(self.schema.kind, date))
    }

    fn assemble(
        &self,
        variant: Variant,
        header: Header,
        watermark: Option<String>,
        sections: Vec<SectionBlock>,
    ) -> Document {
        let reserve = header.estimated_lines();
        Document {
            container_id: container_id(self.schema.kind, variant),
            variant,
            header,
            watermark,
            pages: paginate(sections, self.layout.lines_per_page, reserve),
        }
    }
}

pub fn container_id(kind: FormKind, variant: Variant) -> String {
    format!("{}-pdf-template-{}", kind.slug(), variant.as_str())
}

pub fn filled_filename(kind: FormKind, record: &SubmissionRecord) -> String {
    format!("{}_Submitted_{}.pdf", kind.file_stem(), record.id())
}

pub fn blank_filename(kind: FormKind, date: NaiveDate) -> String {
    format!("{}_Blank_{}.pdf", kind.file_stem(), date.format("%Y-%m-%d"))
}

fn finish(doc: Document, filename: String) -> RenderedDocument {
    RenderedDocument {
        container_id: doc.container_id.clone(),
        filename,
        html: to_html(&doc),
        text: to_text(&doc),
        pages: doc.page_count(),
    }
}

fn filled_row(spec: &FieldSpec, value: Option<&SnapshotValue>) -> Row {
    let label = spec.label.clone();
    match (spec.kind, value) {
        (FieldKind::Selection, Some(SnapshotValue::List(items))) => Row::Bullets {
            label,
            items: items.clone(),
        },
        (FieldKind::Selection, _) => Row::Bullets {
            label,
            items: Vec::new(),
        },
        (FieldKind::Acknowledgement, Some(SnapshotValue::Ack(ack))) => Row::Ack {
            label,
            value: Some(*ack),
        },
        (FieldKind::Acknowledgement, _) => Row::Ack {
            label,
            value: Some(ingest::Acknowledgement::No),
        },
        (FieldKind::LongText, value) => Row::Text {
            label,
            body: text_of(value),
            reserve: FILLED_TEXT_RESERVE,
        },
        (_, value) => Row::Field {
            label,
            value: text_of(value),
        },
    }
}

fn blank_row(spec: &FieldSpec) -> Row {
    let label = spec.label.clone();
    match spec.kind {
        FieldKind::Selection | FieldKind::Choice => Row::Options {
            label,
            options: spec.options.clone(),
        },
        FieldKind::Acknowledgement => Row::Ack { label, value: None },
        FieldKind::LongText => Row::Text {
            label,
            body: String::new(),
            reserve: BLANK_TEXT_RESERVE,
        },
        FieldKind::Text | FieldKind::Date => Row::Field {
            label,
            value: BLANK_RULE.into(),
        },
    }
}

fn text_of(value: Option<&SnapshotValue>) -> String {
    match value {
        Some(SnapshotValue::Text(text)) => text.clone(),
        _ => String::new(),
    }
}
