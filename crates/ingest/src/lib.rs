//! Intake ingest layer
//!
//! This is where a form submission enters the pipeline. A session edits a
//! [`WorkingInput`], the [`BotPolicy`] screens it, the [`Validator`] checks it
//! against the form's [`FormSchema`], and an accepted input is frozen into a
//! [`Snapshot`] that every later stage reads from.
//!
//! ## What we do here
//!
//! - **Declare the forms** - [`FormSchema::discovery`] and
//!   [`FormSchema::scope_of_work`] list every field in order, with labels,
//!   rules, messages and option catalogs.
//! - **Screen bots** - a hidden decoy field plus a minimum interaction time.
//! - **Validate** - every rule is evaluated and all failures are collected
//!   into an ordered [`ErrorMap`]; the first entry is the focus target.
//! - **Freeze** - [`Snapshot::capture`] only accepts a [`ValidInput`], so an
//!   unvalidated snapshot cannot exist.
//!
//! Nothing here performs I/O.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use ingest::{Field, FormKind, FormSchema, Snapshot, Validator, WorkingInput};
//!
//! let schema = Arc::new(FormSchema::discovery());
//! let validator = Validator::new(Arc::clone(&schema));
//!
//! let mut input = WorkingInput::new(FormKind::Discovery);
//! input.set_text(&schema, Field::FromName, "Jane Doe").unwrap();
//!
//! let errors = validator.validate(&input);
//! assert_eq!(errors.first(), Some(Field::UserEmail));
//! assert!(validator.accept(&input).is_err());
//! ```
mod bot;
mod error;
mod field;
mod forms;
mod input;
mod schema;
mod snapshot;
mod validate;

pub use crate::bot::{BotPolicy, BotSignal, BotVerdict, DEFAULT_MIN_INTERACTION};
pub use crate::error::IngestError;
pub use crate::field::{Field, FieldValue, SelectionSet, UnknownFieldName};
pub use crate::forms::{
    ACCESS_OPTIONS, AVAILABILITY, BILLING_MODELS, CONTENT_OWNERS, DESIGN_DIRECTIONS,
    DISCOVERY_GOALS, DISCOVERY_SERVICES, PRIMARY_OBJECTIVES, PROJECT_TYPES, SOW_SERVICES,
    THIRD_PARTY_COSTS,
};
pub use crate::input::WorkingInput;
pub use crate::schema::{FieldKind, FieldSpec, FormKind, FormSchema, Rule, Section, OTHER_OPTION};
pub use crate::snapshot::{Acknowledgement, Snapshot, SnapshotValue};
pub use crate::validate::{ErrorMap, ValidInput, Validator};
