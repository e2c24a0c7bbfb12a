//! Statically declared form schemas.
//!
//! A [`FormSchema`] is an ordered list of [`Section`]s, each an ordered list
//! of [`FieldSpec`]s. Declaration order is load-bearing: the validator picks
//! the first failing field in this order for focus, the canonical text builder
//! prints fields in this order, and the document renderer lays out sections in
//! this order. Schemas are plain immutable data; callers construct one with
//! [`FormSchema::discovery`] or [`FormSchema::scope_of_work`] (or
//! [`FormSchema::for_kind`]) and inject it, usually behind an `Arc`, into the
//! components that need it.
//!
//! # Rules
//!
//! Each field carries one [`Rule`] plus the shape checks implied by its
//! [`FieldKind`]:
//!
//! | Kind | Implied check (when non-empty) |
//! |------|--------------------------------|
//! | `Date` | must be a real `YYYY-MM-DD` calendar date |
//! | `Choice` | must be one of the field's options |
//! | `Selection` | every label must be one of the field's options |
//!
//! `Rule::Required` means "non-empty" for text, "at least one label" for a
//! selection, and "checked" for an acknowledgement.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// The two intake forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Discovery,
    ScopeOfWork,
}

impl FormKind {
    /// Human-readable form type, used in subjects and headers.
    pub fn title(self) -> &'static str {
        match self {
            FormKind::Discovery => "Discovery Intake",
            FormKind::ScopeOfWork => "Scope of Work",
        }
    }

    /// Identifier prefix used when none is configured.
    pub fn default_prefix(self) -> &'static str {
        match self {
            FormKind::Discovery => "DISC",
            FormKind::ScopeOfWork => "SOW",
        }
    }

    /// Short lowercase token used for document container ids.
    pub fn slug(self) -> &'static str {
        match self {
            FormKind::Discovery => "discovery",
            FormKind::ScopeOfWork => "sow",
        }
    }

    /// Stem used for exported file names.
    pub fn file_stem(self) -> &'static str {
        match self {
            FormKind::Discovery => "Discovery",
            FormKind::ScopeOfWork => "SOW",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discovery" | "disc" => Ok(FormKind::Discovery),
            "scope_of_work" | "scope-of-work" | "sow" => Ok(FormKind::ScopeOfWork),
            other => Err(format!("unknown form kind `{other}`")),
        }
    }
}

/// Shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Multi-line free text; printed as a block.
    LongText,
    /// `YYYY-MM-DD` date string.
    Date,
    /// One label from a fixed option list.
    Choice,
    /// Any number of labels from a fixed option list.
    Selection,
    /// A checkbox that renders as `YES`/`NO`.
    Acknowledgement,
}

impl FieldKind {
    /// Whether values of this kind are stored as text in the working input.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::LongText | FieldKind::Date | FieldKind::Choice
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::LongText => "long text",
            FieldKind::Date => "date",
            FieldKind::Choice => "choice",
            FieldKind::Selection => "selection",
            FieldKind::Acknowledgement => "acknowledgement",
        };
        f.write_str(name)
    }
}

/// The primary constraint on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Blank is acceptable.
    Optional,
    /// Non-empty text, at least one selected label, or a checked box.
    Required,
    /// Trimmed text must contain at least this many characters.
    MinLength(usize),
    /// Trimmed text must look like `local@domain.tld`.
    Email,
    /// Required only when the companion field holds [`OTHER_OPTION`].
    RequiredIfOther(Field),
}

/// Option label that unlocks a "specify other" companion field.
pub const OTHER_OPTION: &str = "Other";

/// Declaration of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// Label printed in canonical text and documents.
    pub label: String,
    pub kind: FieldKind,
    pub rule: Rule,
    /// Message surfaced when `rule` fails.
    pub message: String,
    /// Catalog for `Choice` and `Selection` fields; empty otherwise.
    pub options: Vec<String>,
}

impl FieldSpec {
    fn new(field: Field, label: &str, kind: FieldKind) -> Self {
        Self {
            field,
            label: label.to_string(),
            kind,
            rule: Rule::Optional,
            message: String::new(),
            options: Vec::new(),
        }
    }

    pub fn text(field: Field, label: &str) -> Self {
        Self::new(field, label, FieldKind::Text)
    }

    pub fn long_text(field: Field, label: &str) -> Self {
        Self::new(field, label, FieldKind::LongText)
    }

    pub fn date(field: Field, label: &str) -> Self {
        Self::new(field, label, FieldKind::Date)
    }

    pub fn choice(field: Field, label: &str, options: &[&str]) -> Self {
        Self {
            options: options.iter().map(|o| o.to_string()).collect(),
            ..Self::new(field, label, FieldKind::Choice)
        }
    }

    pub fn selection(field: Field, label: &str, options: &[&str]) -> Self {
        Self {
            options: options.iter().map(|o| o.to_string()).collect(),
            ..Self::new(field, label, FieldKind::Selection)
        }
    }

    /// Acknowledgements are always required to be checked.
    pub fn acknowledgement(field: Field, label: &str) -> Self {
        Self::new(field, label, FieldKind::Acknowledgement).rule(Rule::Required, "Required.")
    }

    /// Attach a rule and the message shown when it fails.
    pub fn rule(mut self, rule: Rule, message: &str) -> Self {
        self.rule = rule;
        self.message = message.to_string();
        self
    }

    pub fn is_required(&self) -> bool {
        !matches!(self.rule, Rule::Optional | Rule::RequiredIfOther(_))
    }

    pub fn allows(&self, label: &str) -> bool {
        self.options.iter().any(|o| o == label)
    }
}

/// A titled group of fields, printed and rendered as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl Section {
    pub fn new(title: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            title: title.to_string(),
            fields,
        }
    }
}

/// The full, ordered field list of one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub kind: FormKind,
    pub sections: Vec<Section>,
}

impl FormSchema {
    pub fn new(kind: FormKind, sections: Vec<Section>) -> Self {
        Self { kind, sections }
    }

    pub fn for_kind(kind: FormKind) -> Self {
        match kind {
            FormKind::Discovery => Self::discovery(),
            FormKind::ScopeOfWork => Self::scope_of_work(),
        }
    }

    /// All field specs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn spec(&self, field: Field) -> Option<&FieldSpec> {
        self.fields().find(|spec| spec.field == field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.spec(field).is_some()
    }

    /// Fields whose rule is unconditionally required.
    pub fn required_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields().filter(|s| s.is_required()).map(|s| s.field)
    }
}
