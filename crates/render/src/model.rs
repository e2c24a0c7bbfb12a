//! Backend-neutral document model.
//!
//! A [`Document`] is a header, an optional watermark, and a list of pages,
//! each holding whole [`SectionBlock`]s. The HTML and plain-text backends
//! walk the same model, so anything present in one is present in the other.
use ingest::Acknowledgement;
use serde::Serialize;

/// Printed where a blank template leaves room for handwriting.
pub const BLANK_RULE: &str = "______________________________";

/// Bullet prefix for selected labels.
pub const BULLET: &str = "• ";

/// Box prefix for unchecked template items.
pub const CHECKBOX: &str = "☐ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Filled,
    Blank,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Filled => "filled",
            Variant::Blank => "blank",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum Row {
    /// `Label: value` on one line.
    Field { label: String, value: String },
    /// `Label:` followed by a free-text body; `reserve` is the minimum number
    /// of body lines the row occupies.
    Text {
        label: String,
        body: String,
        reserve: usize,
    },
    /// `Label:` followed by one bullet per selected item.
    Bullets { label: String, items: Vec<String> },
    /// `Label:` followed by one checkbox per catalog option.
    Options { label: String, options: Vec<String> },
    /// An acknowledgement: `Label: YES` when filled, a checkbox when blank.
    Ack {
        label: String,
        value: Option<Acknowledgement>,
    },
}

impl Row {
    pub fn label(&self) -> &str {
        match self {
            Row::Field { label, .. }
            | Row::Text { label, .. }
            | Row::Bullets { label, .. }
            | Row::Options { label, .. }
            | Row::Ack { label, .. } => label,
        }
    }

    /// Printed line count used for pagination.
    pub fn estimated_lines(&self) -> usize {
        match self {
            Row::Field { .. } | Row::Ack { .. } => 1,
            Row::Text { body, reserve, .. } => 1 + body.lines().count().max(*reserve).max(1),
            Row::Bullets { items, .. } => 1 + items.len().max(1),
            Row::Options { options, .. } => 1 + options.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionBlock {
    pub title: String,
    pub rows: Vec<Row>,
}

impl SectionBlock {
    pub fn new(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }

    /// Title line, rows, and one line of spacing.
    pub fn estimated_lines(&self) -> usize {
        2 + self.rows.iter().map(Row::estimated_lines).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub title: String,
    /// Right-aligned `label: value` pairs (identifier, short hash, date).
    pub meta: Vec<(String, String)>,
}

impl Header {
    pub fn estimated_lines(&self) -> usize {
        2 + self.meta.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: usize,
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub container_id: String,
    pub variant: Variant,
    pub header: Header,
    pub watermark: Option<String>,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionBlock> {
        self.pages.iter().flat_map(|p| p.sections.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_estimates() {
        let text = Row::Text {
            label: "Notes".into(),
            body: "a\nb\nc".into(),
            reserve: 2,
        };
        assert_eq!(text.estimated_lines(), 4);

        let empty = Row::Text {
            label: "Notes".into(),
            body: String::new(),
            reserve: 0,
        };
        assert_eq!(empty.estimated_lines(), 2);

        let bullets = Row::Bullets {
            label: "Goals".into(),
            items: vec![],
        };
        assert_eq!(bullets.estimated_lines(), 2);

        let section = SectionBlock::new("Client", vec![text, bullets]);
        assert_eq!(section.estimated_lines(), 2 + 4 + 2);
    }
}
