//! Printable plain-text backend.
use crate::model::{Document, Row, BULLET, CHECKBOX};

pub fn to_text(doc: &Document) -> String {
    let mut lines: Vec<String> = Vec::new();
    let total = doc.pages.len();

    for page in &doc.pages {
        if page.number > 1 {
            lines.push("\u{000C}".to_string());
        }
        lines.push(format!("--- Page {} of {total} ---", page.number));
        if let Some(mark) = &doc.watermark {
            lines.push(format!("[{mark}]"));
        }
        if page.number == 1 {
            lines.push(doc.header.title.clone());
            for (label, value) in &doc.header.meta {
                lines.push(format!("{label}: {value}"));
            }
            lines.push("=".repeat(doc.header.title.chars().count().max(8)));
        }
        for section in &page.sections {
            lines.push(String::new());
            lines.push(format!("[{}]", section.title));
            for row in &section.rows {
                push_row(&mut lines, row);
            }
        }
    }

    lines.join("\n")
}

fn push_row(lines: &mut Vec<String>, row: &Row) {
    match row {
        Row::Field { label, value } => lines.push(format!("{label}: {value}")),
        Row::Text {
            label,
            body,
            reserve,
        } => {
            lines.push(format!("{label}:"));
            let mut used = 0;
            for line in body.lines() {
                lines.push(line.to_string());
                used += 1;
            }
            for _ in used..(*reserve).max(1) {
                lines.push(String::new());
            }
        }
        Row::Bullets { label, items } => {
            lines.push(format!("{label}:"));
            if items.is_empty() {
                lines.push(String::new());
            }
            lines.extend(items.iter().map(|item| format!("{BULLET}{item}")));
        }
        Row::Options { label, options } => {
            lines.push(format!("{label}:"));
            lines.extend(options.iter().map(|option| format!("{CHECKBOX}{option}")));
        }
        Row::Ack { label, value } => match value {
            Some(ack) => lines.push(format!("{label}: {}", ack.as_str())),
            None => lines.push(format!("{CHECKBOX}{label}")),
        },
    }
}
