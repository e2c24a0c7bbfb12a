//! Intake: submission-integrity pipeline for client intake forms.
//!
//! Ties the workspace crates together into one per-form session:
//!
//! - [`ingest`] declares the Discovery and Scope of Work schemas, screens bots,
//!   validates, and freezes accepted input into a snapshot.
//! - [`canonical`] derives the submission identifier, the client and internal
//!   texts, and the SHA-256 fingerprint.
//! - [`render`] lays the same snapshot out as a paginated document.
//!
//! This crate adds the orchestrator ([`FormSession`]), the outer collaborators
//! ([`NotificationChannel`], [`DocumentExporter`]), injectable time
//! ([`Clock`]), and YAML configuration ([`IntakeConfig`]).
//!
//! ```no_run
//! use std::sync::Arc;
//! use intake::{Field, FormEngine, FormKind, FormSession, IntakeConfig, LogChannel};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IntakeConfig::default();
//! let engine = FormEngine::new(FormKind::Discovery, &config)?;
//! let session = FormSession::new(engine, Arc::new(LogChannel));
//!
//! session.edit(Field::FromName, "Jane Doe")?;
//! let outcome = session.submit().await;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```
pub mod clock;
pub mod config;
pub mod engine;
pub mod export;
pub mod metrics;
pub mod notify;
pub mod session;

pub use canonical::{
    fingerprint, CanonicalError, CanonicalTexts, Fingerprint, RandomSource, SeededRandom,
    SubmissionId, SubmissionRecord, ThreadRandom,
};
pub use ingest::{
    BotPolicy, BotSignal, BotVerdict, ErrorMap, Field, FieldValue, FormKind, FormSchema,
    IngestError, Snapshot, WorkingInput,
};
pub use render::{DocumentRenderer, LayoutConfig, RenderedDocument};

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{
    ChannelKind, ConfigLoadError, FormsConfig, IntakeConfig, LoggingConfig, NotifyConfig,
    RenderConfig,
};
pub use crate::engine::FormEngine;
pub use crate::export::{DocumentExporter, ExportError, ExportRequest, HtmlDirectoryExporter};
pub use crate::metrics::SubmissionMetrics;
pub use crate::notify::{
    channel_from_config, LogChannel, NotificationChannel, NotificationPayload, NotifyError,
};
#[cfg(feature = "webhook")]
pub use crate::notify::WebhookChannel;
pub use crate::session::{
    FormSession, Receipt, SubmissionStatus, SubmitOutcome, DISPATCH_FAILURE_MESSAGE,
};
