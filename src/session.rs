//! Per-form submission orchestrator.
//!
//! A [`FormSession`] owns one working input and walks it through
//! `Idle → Checking → Validating → Snapshotting → Sending → Success | Error`.
//! Everything up to `Sending` is synchronous and happens under the state lock;
//! the notification channel call is the only await point.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use canonical::{Fingerprint, RandomSource, SubmissionId, SubmissionRecord, ThreadRandom};
use chrono::{DateTime, Utc};
use ingest::{BotVerdict, ErrorMap, Field, FormKind, IngestError, Snapshot, WorkingInput};
use render::RenderedDocument;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::clock::{Clock, SystemClock};
use crate::engine::FormEngine;
use crate::export::{DocumentExporter, ExportError, ExportRequest};
use crate::metrics::{MetricsSpan, SubmissionMetrics};
use crate::notify::{NotificationChannel, NotificationPayload};

/// Shown to the user when the channel rejects a submission.
pub const DISPATCH_FAILURE_MESSAGE: &str =
    "Something went wrong. Please try again or email directly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Idle,
    Checking,
    Validating,
    Snapshotting,
    Sending,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Checking => "checking",
            SubmissionStatus::Validating => "validating",
            SubmissionStatus::Snapshotting => "snapshotting",
            SubmissionStatus::Sending => "sending",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        }
    }
}

/// What the user is shown after a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub submission_id: SubmissionId,
    pub fingerprint: Fingerprint,
    pub short_hash: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Dispatched. `receipt` is `None` when a bot was silently dropped.
    Success { receipt: Option<Receipt> },
    /// Validation failed; nothing was generated.
    Invalid {
        errors: ErrorMap,
        focus: Option<Field>,
    },
    /// The channel rejected the submission. Call [`FormSession::retry`].
    Failed { message: String },
    /// Another submission is in flight or the session already finished.
    Ignored,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success { .. })
    }
}

struct SessionState {
    input: WorkingInput,
    errors: ErrorMap,
    focus: Option<Field>,
    status: SubmissionStatus,
    snapshot: Option<Snapshot>,
    record: Option<SubmissionRecord>,
    error_message: Option<String>,
}

impl SessionState {
    fn fresh(kind: FormKind, clock: &dyn Clock) -> Self {
        Self {
            input: WorkingInput::new(kind).with_signed_date(clock.today()),
            errors: ErrorMap::new(),
            focus: None,
            status: SubmissionStatus::Idle,
            snapshot: None,
            record: None,
            error_message: None,
        }
    }

    fn transition(&mut self, status: SubmissionStatus) {
        debug!(from = self.status.as_str(), to = status.as_str(), "status_changed");
        self.status = status;
    }
}

/// Everything produced synchronously before the channel call.
struct Sealed {
    snapshot: Snapshot,
    record: SubmissionRecord,
    payload: NotificationPayload,
    sent_at: DateTime<Utc>,
}

enum Prepared {
    Bot,
    Invalid(ErrorMap, Option<Field>),
    Sealed(Box<Sealed>),
    Failed,
}

/// One user's session with one form.
///
/// Sessions are `Send + Sync`; a shared session rejects overlapping submits
/// with [`SubmitOutcome::Ignored`].
pub struct FormSession {
    engine: FormEngine,
    clock: Arc<dyn Clock>,
    rng: Mutex<Box<dyn RandomSource>>,
    channel: Arc<dyn NotificationChannel>,
    exporter: Option<Arc<dyn DocumentExporter>>,
    metrics: Option<Arc<dyn SubmissionMetrics>>,
    opened_at: Instant,
    busy: AtomicBool,
    state: Mutex<SessionState>,
    last_export: Mutex<Option<JoinHandle<()>>>,
}

impl FormSession {
    pub fn new(engine: FormEngine, channel: Arc<dyn NotificationChannel>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            state: Mutex::new(SessionState::fresh(engine.kind(), clock.as_ref())),
            opened_at: clock.instant(),
            clock,
            rng: Mutex::new(Box::new(ThreadRandom)),
            channel,
            exporter: None,
            metrics: None,
            busy: AtomicBool::new(false),
            last_export: Mutex::new(None),
            engine,
        }
    }

    /// Replaces the clock. The interaction timer restarts and the signed
    /// date is re-filled from the new clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.opened_at = clock.instant();
        *self.state.get_mut().unwrap_or_else(|e| e.into_inner()) =
            SessionState::fresh(self.engine.kind(), clock.as_ref());
        self.clock = clock;
        self
    }

    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn with_exporter(mut self, exporter: Arc<dyn DocumentExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn SubmissionMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn engine(&self) -> &FormEngine {
        &self.engine
    }

    pub fn kind(&self) -> FormKind {
        self.engine.kind()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ── Editing ──────────────────────────────────────────────────────────

    /// Writes a text, date, or choice field and clears its error.
    pub fn edit(&self, field: Field, value: impl Into<String>) -> Result<(), IngestError> {
        let mut state = self.state();
        state.input.set_text(self.engine.schema(), field, value)?;
        state.errors.clear(field);
        Ok(())
    }

    /// Flips one label of a selection field and clears its error.
    pub fn toggle(&self, field: Field, label: &str) -> Result<bool, IngestError> {
        let mut state = self.state();
        let selected = state.input.toggle(self.engine.schema(), field, label)?;
        state.errors.clear(field);
        Ok(selected)
    }

    pub fn acknowledge(&self, field: Field, checked: bool) -> Result<(), IngestError> {
        let mut state = self.state();
        state.input.set_flag(self.engine.schema(), field, checked)?;
        state.errors.clear(field);
        Ok(())
    }

    pub fn set_decoy(&self, value: impl Into<String>) {
        self.state().input.set_decoy(value);
    }

    /// Replaces the working input wholesale, e.g. from a deserialized draft.
    pub fn load(&self, input: WorkingInput) -> Result<(), IngestError> {
        input.conform(self.engine.schema())?;
        let mut state = self.state();
        state.input = input;
        state.errors = ErrorMap::new();
        state.focus = None;
        Ok(())
    }

    // ── Submission ───────────────────────────────────────────────────────

    /// Runs one submission attempt.
    pub async fn submit(&self) -> SubmitOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            let status = self.status();
            info!(form = %self.kind(), status = status.as_str(), "submit_ignored");
            return SubmitOutcome::Ignored;
        }
        let span = info_span!("intake.submit", form = %self.kind());
        self.run_submit().instrument(span).await
    }

    async fn run_submit(&self) -> SubmitOutcome {
        let start = Instant::now();
        let sealed = match self.prepare() {
            Prepared::Bot => return SubmitOutcome::Success { receipt: None },
            Prepared::Invalid(errors, focus) => {
                warn!(
                    error_count = errors.len(),
                    focus = focus.map(Field::name),
                    elapsed_micros = start.elapsed().as_micros() as u64,
                    "validation_failed"
                );
                return SubmitOutcome::Invalid { errors, focus };
            }
            Prepared::Failed => {
                return SubmitOutcome::Failed {
                    message: DISPATCH_FAILURE_MESSAGE.to_string(),
                };
            }
            Prepared::Sealed(sealed) => *sealed,
        };

        let dispatch_metrics = MetricsSpan::start(self.metrics.as_ref());
        let result = self.channel.send(&sealed.payload).await;
        if let Some(span) = dispatch_metrics {
            span.record_dispatch(result.clone());
        }

        match result {
            Ok(()) => {
                self.state().transition(SubmissionStatus::Success);
                info!(
                    submission_id = %sealed.record.id(),
                    channel = self.channel.name(),
                    elapsed_micros = start.elapsed().as_micros() as u64,
                    "submission_sent"
                );
                self.schedule_export(&sealed.snapshot, &sealed.record);
                let short_hash = sealed
                    .record
                    .fingerprint()
                    .preview(self.engine.renderer().layout().hash_preview_chars);
                SubmitOutcome::Success {
                    receipt: Some(Receipt {
                        submission_id: sealed.record.id().clone(),
                        fingerprint: sealed.record.fingerprint().clone(),
                        short_hash,
                        sent_at: sealed.sent_at,
                    }),
                }
            }
            Err(err) => {
                let mut state = self.state();
                state.transition(SubmissionStatus::Error);
                state.error_message = Some(DISPATCH_FAILURE_MESSAGE.to_string());
                warn!(
                    submission_id = %sealed.record.id(),
                    channel = self.channel.name(),
                    error = %err,
                    elapsed_micros = start.elapsed().as_micros() as u64,
                    "dispatch_failure"
                );
                SubmitOutcome::Failed {
                    message: DISPATCH_FAILURE_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Bot check, validation, snapshot, identifier, texts and seal. Leaves the
    /// session in `Sending` when a payload is ready.
    fn prepare(&self) -> Prepared {
        let mut state = self.state();
        state.error_message = None;
        state.snapshot = None;
        state.record = None;

        state.transition(SubmissionStatus::Checking);
        let elapsed = self
            .clock
            .instant()
            .saturating_duration_since(self.opened_at);
        if let BotVerdict::Suspected(signal) = self.engine.bot().check(&state.input, elapsed) {
            state.transition(SubmissionStatus::Success);
            if let Some(metrics) = &self.metrics {
                metrics.record_bot(signal.as_str());
            }
            info!(
                signal = signal.as_str(),
                interaction_ms = elapsed.as_millis() as u64,
                "bot_suppressed"
            );
            return Prepared::Bot;
        }

        state.transition(SubmissionStatus::Validating);
        let validation_metrics = MetricsSpan::start(self.metrics.as_ref());
        let valid = match self.engine.validator().accept(&state.input) {
            Ok(valid) => {
                if let Some(span) = validation_metrics {
                    span.record_validation(0);
                }
                valid
            }
            Err(errors) => {
                if let Some(span) = validation_metrics {
                    span.record_validation(errors.len());
                }
                let focus = errors.first();
                state.errors = errors.clone();
                state.focus = focus;
                state.transition(SubmissionStatus::Idle);
                self.busy.store(false, Ordering::Release);
                return Prepared::Invalid(errors, focus);
            }
        };
        state.errors = ErrorMap::new();
        state.focus = None;

        state.transition(SubmissionStatus::Snapshotting);
        let snapshot = Snapshot::capture(valid);
        let generated = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            SubmissionId::generate(self.engine.prefix(), self.clock.today(), &mut **rng)
        };
        let id = match generated {
            Ok(id) => id,
            Err(err) => {
                state.transition(SubmissionStatus::Error);
                state.error_message = Some(DISPATCH_FAILURE_MESSAGE.to_string());
                warn!(error = %err, "id_generation_failed");
                return Prepared::Failed;
            }
        };
        let texts = self.engine.texts().render(&snapshot, &id);
        let record = SubmissionRecord::seal(id, texts);
        let sent_at = self.clock.now();
        let payload = NotificationPayload::build(&snapshot, &record, sent_at);

        state.snapshot = Some(snapshot.clone());
        state.record = Some(record.clone());
        state.transition(SubmissionStatus::Sending);
        Prepared::Sealed(Box::new(Sealed {
            snapshot,
            record,
            payload,
            sent_at,
        }))
    }

    fn schedule_export(&self, snapshot: &Snapshot, record: &SubmissionRecord) {
        let Some(exporter) = self.exporter.as_ref().map(Arc::clone) else {
            return;
        };
        let request = ExportRequest::from(self.engine.renderer().render_filled(snapshot, record));
        let handle = tokio::spawn(
            async move {
                let filename = request.filename.clone();
                match exporter.export(request).await {
                    Ok(location) => info!(%location, "document_exported"),
                    Err(err) => warn!(%filename, error = %err, "export_failed"),
                }
            }
            .in_current_span(),
        );
        *self.last_export.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
    }

    /// Waits for the most recent background export, if any.
    pub async fn wait_for_export(&self) {
        let handle = self
            .last_export
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!(error = %err, "export_task_aborted");
            }
        }
    }

    /// Moves `Error` back to `Idle` so the user can submit again. The next
    /// attempt recomputes everything, including the identifier.
    pub fn retry(&self) -> bool {
        let mut state = self.state();
        if state.status != SubmissionStatus::Error {
            return false;
        }
        state.error_message = None;
        state.transition(SubmissionStatus::Idle);
        self.busy.store(false, Ordering::Release);
        true
    }

    // ── Documents ────────────────────────────────────────────────────────

    /// Re-renders the submitted copy. Only available after a real success.
    pub fn document(&self) -> Option<RenderedDocument> {
        let state = self.state();
        if state.status != SubmissionStatus::Success {
            return None;
        }
        match (&state.snapshot, &state.record) {
            (Some(snapshot), Some(record)) => {
                Some(self.engine.renderer().render_filled(snapshot, record))
            }
            _ => None,
        }
    }

    pub fn blank_document(&self) -> RenderedDocument {
        self.engine.renderer().render_blank(self.clock.today())
    }

    /// Exports the blank template directly, without going through a submit.
    pub async fn export_blank(&self) -> Result<String, ExportError> {
        let exporter = self.exporter.as_ref().ok_or(ExportError::NotConfigured)?;
        exporter
            .export(ExportRequest::from(self.blank_document()))
            .await
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn status(&self) -> SubmissionStatus {
        self.state().status
    }

    pub fn errors(&self) -> ErrorMap {
        self.state().errors.clone()
    }

    pub fn focus(&self) -> Option<Field> {
        self.state().focus
    }

    pub fn input(&self) -> WorkingInput {
        self.state().input.clone()
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state().snapshot.clone()
    }

    pub fn record(&self) -> Option<SubmissionRecord> {
        self.state().record.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state().error_message.clone()
    }
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("kind", &self.kind())
            .field("status", &self.status())
            .field("channel", &self.channel.name())
            .field("exporter", &self.exporter.is_some())
            .finish()
    }
}
