//! Error types produced by the ingest crate.
//!
//! Field-level validation failures are *not* errors in this sense: they are
//! collected into an [`ErrorMap`](crate::ErrorMap) so the presentation layer
//! can show all of them at once. [`IngestError`] covers misuse of the working
//! input itself, such as editing a field that does not belong to the form or
//! writing a value of the wrong shape.
//!
//! # Error Categories
//!
//! | Error | Description |
//! |-------|-------------|
//! | [`UnknownField`](IngestError::UnknownField) | Field is not declared by the form's schema |
//! | [`KindMismatch`](IngestError::KindMismatch) | Edit does not match the field's declared kind |
//! | [`UnknownOption`](IngestError::UnknownOption) | Label is not part of the field's catalog |
//! | [`FormMismatch`](IngestError::FormMismatch) | Input was filled for a different form |
//!
//! # Examples
//!
//! ```rust
//! use ingest::{Field, FormKind, IngestError};
//!
//! let err = IngestError::UnknownField {
//!     form: FormKind::Discovery,
//!     field: Field::BillingModel,
//! };
//! assert!(err.to_string().contains("billing_model"));
//! ```
use thiserror::Error;

use crate::field::Field;
use crate::schema::{FieldKind, FormKind};

/// Errors raised when a working input is edited in a way the schema forbids.
///
/// All variants are cloneable and comparable so tests can match them exactly.
/// The enum is `#[non_exhaustive]`; callers should keep a catch-all arm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The field is not part of this form's schema.
    #[error("field `{field}` is not part of the {form} form")]
    UnknownField { form: FormKind, field: Field },

    /// The edit does not match the field's declared kind.
    ///
    /// For example toggling a selection label on a free-text field.
    #[error("field `{field}` expects a {expected} value")]
    KindMismatch { field: Field, expected: FieldKind },

    /// The label is not part of the field's fixed catalog.
    #[error("`{label}` is not an option for field `{field}`")]
    UnknownOption { field: Field, label: String },

    /// The input belongs to another form type.
    #[error("input is for the {found} form, expected {expected}")]
    FormMismatch { expected: FormKind, found: FormKind },
}
