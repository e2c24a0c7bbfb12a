//! Intake document renderer.
//!
//! Produces the human-readable copy of a submission from the same
//! [`Snapshot`](ingest::Snapshot) and [`SubmissionRecord`](canonical::SubmissionRecord)
//! that were dispatched, plus a blank printable template. Output is a
//! paginated [`Document`] model rendered to escaped HTML and to plain text.
//!
//! Rendering is pure: no clock, no randomness, no I/O. Rendering the same
//! inputs twice yields byte-identical output.

mod html;
mod model;
mod paginate;
mod plain;
mod renderer;

pub use crate::html::{escape, to_html};
pub use crate::model::{
    Document, Header, Page, Row, SectionBlock, Variant, BLANK_RULE, BULLET, CHECKBOX,
};
pub use crate::paginate::paginate;
pub use crate::plain::to_text;
pub use crate::renderer::{
    blank_filename, container_id, filled_filename, DocumentRenderer, LayoutConfig,
    RenderedDocument, PROVENANCE, WATERMARK,
};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use canonical::{ClientNote, SubmissionId, SubmissionRecord, TextBuilder};
    use chrono::NaiveDate;
    use ingest::{Field, FieldKind, FormKind, FormSchema, Snapshot, Validator, WorkingInput};

    use super::*;

    fn day() -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(2026, 1, 10) else {
            panic!("invalid date components");
        };
        date
    }

    fn submission(schema: &Arc<FormSchema>) -> (Snapshot, SubmissionRecord) {
        let mut input = WorkingInput::new(FormKind::Discovery).with_signed_date(day());
        for (field, value) in [
            (Field::FromName, "Jane Doe"),
            (Field::Company, "Ocean <Café> & Co"),
            (Field::UserEmail, "jane@biz.com"),
            (Field::Timezone, "America/Chicago"),
            (Field::ProjectName, "Ocean Café Site"),
            (
                Field::ProjectSummary,
                "A new site for the café.\nOnline menu and \"book a table\".",
            ),
            (Field::BudgetRange, "$1,500–$2,500"),
            (Field::Availability, "Flexible / as needed"),
            (Field::Signature, "Jane Doe"),
        ] {
            input.set_text(schema, field, value).expect("edit");
        }
        for (field, label) in [
            (Field::ProjectTypes, "Website"),
            (Field::ProjectTypes, "Analytics / Tracking"),
            (Field::Goals, "Lead generation"),
            (Field::Services, "GA4 + GTM setup"),
        ] {
            input.toggle(schema, field, label).expect("toggle");
        }
        for field in [Field::AckPaid, Field::AckNoDev, Field::AckScope] {
            input.set_flag(schema, field, true).expect("ack");
        }
        let snapshot = match Validator::new(Arc::clone(schema)).accept(&input) {
            Ok(valid) => Snapshot::capture(valid),
            Err(errors) => panic!("expected valid input: {errors:?}"),
        };
        let id = SubmissionId::parse("DISC-20260110-7QX2MB").expect("id");
        let texts = TextBuilder::new(Arc::clone(schema), ClientNote::new("Derek"))
            .render(&snapshot, &id);
        let record = SubmissionRecord::seal(id, texts);
        (snapshot, record)
    }

    fn renderer(schema: &Arc<FormSchema>) -> DocumentRenderer {
        DocumentRenderer::new(Arc::clone(schema), LayoutConfig::default())
    }

    #[test]
    fn filled_render_is_idempotent() {
        let schema = Arc::new(FormSchema::discovery());
        let (snapshot, record) = submission(&schema);
        let renderer = renderer(&schema);

        assert_eq!(
            renderer.render_filled(&snapshot, &record),
            renderer.render_filled(&snapshot, &record)
        );
    }

    #[test]
    fn every_dispatched_value_appears_in_the_document() {
        let schema = Arc::new(FormSchema::discovery());
        let (snapshot, record) = submission(&schema);
        let doc = renderer(&schema).render_filled(&snapshot, &record);

        for spec in schema.fields() {
            match spec.kind {
                FieldKind::Selection => {
                    for label in snapshot.list(spec.field) {
                        let bullet = format!("{BULLET}{label}");
                        assert!(doc.text.contains(&bullet), "{bullet}");
                        assert!(doc.html.contains(&escape(&bullet)), "{bullet}");
                    }
                }
                FieldKind::Acknowledgement => {
                    let line = format!("{}: YES", spec.label);
                    assert!(doc.text.contains(&line), "{line}");
                }
                _ => {
                    let value = snapshot.text(spec.field);
                    if value.is_empty() {
                        continue;
                    }
                    assert!(record.internal_text().contains(value));
                    assert!(doc.text.contains(value), "{value}");
                    assert!(doc.html.contains(&escape(value)), "{value}");
                }
            }
        }
    }

    #[test]
    fn filled_copy_carries_integrity_details() {
        let schema = Arc::new(FormSchema::discovery());
        let (snapshot, record) = submission(&schema);
        let doc = renderer(&schema).render_filled(&snapshot, &record);
        let full = record.fingerprint().as_str();

        assert_eq!(doc.container_id, "discovery-pdf-template-filled");
        assert_eq!(doc.filename, "Discovery_Submitted_DISC-20260110-7QX2MB.pdf");
        assert!(doc.text.contains("Submission ID: DISC-20260110-7QX2MB"));
        assert!(doc.text.contains(&format!("Hash (short): {}...", &full[..28])));
        assert!(doc.text.contains(&format!("Full Submission Hash: {full}")));
        assert!(doc.text.contains(&format!("Integrity Proof: {PROVENANCE}")));
        assert!(doc.text.contains("[SUBMITTED COPY]"));
        assert!(doc.html.contains(WATERMARK));
    }

    #[test]
    fn html_output_is_escaped() {
        let schema = Arc::new(FormSchema::discovery());
        let (snapshot, record) = submission(&schema);
        let doc = renderer(&schema).render_filled(&snapshot, &record);

        assert!(!doc.html.contains("Ocean <Café>"));
        assert!(doc.html.contains("Ocean &lt;Café&gt; &amp; Co"));
    }

    #[test]
    fn pagination_keeps_sections_whole() {
        let schema = Arc::new(FormSchema::discovery());
        let (snapshot, record) = submission(&schema);
        let tight = DocumentRenderer::new(
            Arc::clone(&schema),
            LayoutConfig {
                lines_per_page: 12,
                ..LayoutConfig::default()
            },
        );
        let doc = tight.filled_document(&snapshot, &record);

        assert!(doc.page_count() > 1);
        let titles: Vec<&str> = doc.sections().map(|s| s.title.as_str()).collect();
        let mut expected: Vec<&str> = schema.sections.iter().map(|s| s.title.as_str()).collect();
        expected.push("Integrity");
        assert_eq!(titles, expected);

        for section in doc.sections() {
            let spec_section = schema.sections.iter().find(|s| s.title == section.title);
            if let Some(spec_section) = spec_section {
                assert_eq!(section.rows.len(), spec_section.fields.len());
            }
        }
    }

    #[test]
    fn blank_template_lists_options_and_dates_name() {
        let schema = Arc::new(FormSchema::scope_of_work());
        let doc = renderer(&schema).render_blank(day());

        assert_eq!(doc.container_id, "sow-pdf-template-blank");
        assert_eq!(doc.filename, "SOW_Blank_2026-01-10.pdf");
        assert!(doc.text.contains("Date: 2026-01-10"));
        assert!(doc.text.contains(&format!("{CHECKBOX}Hourly")));
        assert!(doc.text.contains(&format!("Project Name: {BLANK_RULE}")));
        assert!(!doc.text.contains(WATERMARK));
        assert_eq!(doc, renderer(&schema).render_blank(day()));
    }
}
