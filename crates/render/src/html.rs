//! HTML backend. All user-supplied text passes through [`escape`].
use crate::model::{Document, Row, BULLET, CHECKBOX};

const STYLE: &str = "body{font-family:Arial,sans-serif;font-size:12px;line-height:1.5;color:#000;background:#fff}\
.page{position:relative;width:794px;padding:28px;page-break-after:always}\
.watermark{position:absolute;inset:0;display:flex;align-items:center;justify-content:center;opacity:.08;transform:rotate(-18deg);font-size:72px;font-weight:800;letter-spacing:3px;pointer-events:none}\
.header{display:flex;justify-content:space-between;border-bottom:1px solid #333;padding-bottom:10px;margin-bottom:14px}\
.title{font-size:20px;font-weight:700}\
.meta{text-align:right;font-size:10px;word-break:break-all}\
section{border:1px solid #333;padding:10px;margin-bottom:12px}\
.body{white-space:pre-wrap;border:1px solid #999;padding:8px}\
ul{list-style:none;padding-left:0;margin:4px 0}";

/// Escapes the five HTML-significant characters.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn to_html(doc: &Document) -> String {
    let mut out = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<div id=\"{}\" class=\"document {}\">\n",
        escape(&doc.header.title),
        escape(&doc.container_id),
        doc.variant.as_str()
    );

    let total = doc.pages.len();
    for page in &doc.pages {
        line(
            &mut out,
            &format!(
                "<div class=\"page\" data-page=\"{}\" data-pages=\"{total}\">",
                page.number
            ),
        );
        if let Some(mark) = &doc.watermark {
            line(&mut out, &format!("<div class=\"watermark\">{}</div>", escape(mark)));
        }
        if page.number == 1 {
            out.push_str("<div class=\"header\">\n");
            line(
                &mut out,
                &format!("<div class=\"title\">{}</div>", escape(&doc.header.title)),
            );
            out.push_str("<div class=\"meta\">\n");
            for (label, value) in &doc.header.meta {
                line(
                    &mut out,
                    &format!("<div><b>{}:</b> {}</div>", escape(label), escape(value)),
                );
            }
            out.push_str("</div>\n</div>\n");
        }
        for section in &page.sections {
            line(&mut out, &format!("<section>\n<h3>{}</h3>", escape(&section.title)));
            for row in &section.rows {
                push_row(&mut out, row);
            }
            out.push_str("</section>\n");
        }
        out.push_str("</div>\n");
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn push_row(out: &mut String, row: &Row) {
    match row {
        Row::Field { label, value } => line(
            out,
            &format!("<div>{}: <b>{}</b></div>", escape(label), escape(value)),
        ),
        Row::Text {
            label,
            body,
            reserve,
        } => line(
            out,
            &format!(
                "<div><b>{}:</b></div>\n<div class=\"body\" style=\"min-height:{}em\">{}</div>",
                escape(label),
                (*reserve).max(1) * 3 / 2,
                escape(body)
            ),
        ),
        Row::Bullets { label, items } => {
            line(out, &format!("<div><b>{}:</b></div>\n<ul>", escape(label)));
            for item in items {
                line(out, &format!("<li>{BULLET}{}</li>", escape(item)));
            }
            out.push_str("</ul>\n");
        }
        Row::Options { label, options } => {
            line(out, &format!("<div><b>{}:</b></div>\n<ul>", escape(label)));
            for option in options {
                line(out, &format!("<li>{CHECKBOX}{}</li>", escape(option)));
            }
            out.push_str("</ul>\n");
        }
        Row::Ack { label, value } => match value {
            Some(ack) => line(
                out,
                &format!("<div>{}: <b>{}</b></div>", escape(label), ack.as_str()),
            ),
            None => line(out, &format!("<div>{CHECKBOX}{}</div>", escape(label))),
        },
    }
}
