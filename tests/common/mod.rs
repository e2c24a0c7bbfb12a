//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use intake::{
    Field, FormEngine, FormKind, FormSession, IntakeConfig, ManualClock, NotificationChannel,
    NotificationPayload, NotifyError, SeededRandom,
};
use ingest::THIRD_PARTY_COSTS;
use tokio::sync::Notify;

pub const INTERACTION: Duration = Duration::from_secs(90);

pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 1, 10, 14, 5, 0).unwrap(),
    ))
}

pub fn session(
    kind: FormKind,
    channel: Arc<dyn NotificationChannel>,
    clock: Arc<ManualClock>,
    seed: u64,
) -> FormSession {
    let engine = FormEngine::new(kind, &IntakeConfig::default()).expect("default prefixes");
    FormSession::new(engine, channel)
        .with_clock(clock)
        .with_random(Box::new(SeededRandom::new(seed)))
}

/// The Jane Doe Discovery submission.
pub fn fill_discovery(session: &FormSession) {
    for (field, value) in [
        (Field::FromName, "Jane Doe"),
        (Field::UserEmail, "jane@biz.com"),
        (Field::Timezone, "America/Chicago"),
        (Field::ProjectName, "Ocean Café Site"),
        (
            Field::ProjectSummary,
            "A marketing site for a seaside café with menu and booking.",
        ),
        (Field::BudgetRange, "$1,500–$2,500"),
        (Field::Availability, "Flexible / as needed"),
        (Field::Signature, "Jane Doe"),
        (Field::SignedDate, "2026-01-10"),
    ] {
        session.edit(field, value).expect("discovery edit");
    }
    session
        .toggle(Field::ProjectTypes, "Website")
        .expect("toggle");
    session
        .toggle(Field::Goals, "Lead generation")
        .expect("toggle");
    session
        .toggle(Field::Services, "Custom website")
        .expect("toggle");
    for field in [Field::AckPaid, Field::AckNoDev, Field::AckScope] {
        session.acknowledge(field, true).expect("ack");
    }
}

/// The Jane Doe Scope of Work submission.
pub fn fill_scope_of_work(session: &FormSession) {
    for (field, value) in [
        (Field::FromName, "Jane Doe"),
        (Field::UserEmail, "jane@biz.com"),
        (Field::Timezone, "America/Chicago"),
        (Field::ProjectName, "Ocean Café Site"),
        (Field::PrimaryObjective, "Website Development"),
        (
            Field::ProjectDescription,
            "Marketing site with menu, booking & a <contact> form.",
        ),
        (Field::RequiredFeatures, "Menu, booking, contact form"),
        (Field::TargetStart, "2026-02-01"),
        (Field::TargetEnd, "2026-03-15"),
        (Field::Budget, "$1,500–$2,500"),
        (Field::BillingModel, "Fixed-price"),
        (Field::ThirdPartyCosts, THIRD_PARTY_COSTS[0]),
        (Field::Signature, "Jane Doe"),
        (Field::SignedDate, "2026-01-10"),
    ] {
        session.edit(field, value).expect("sow edit");
    }
    session
        .toggle(Field::Services, "Custom website")
        .expect("toggle");
    for field in [
        Field::AckScope,
        Field::AckChanges,
        Field::AckRevisions,
        Field::AckDelays,
        Field::AckStart,
        Field::AckCosts,
    ] {
        session.acknowledge(field, true).expect("ack");
    }
}

/// Accepts everything and keeps what it was sent.
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<NotificationPayload>>,
}

impl RecordingChannel {
    pub fn sent(&self) -> Vec<NotificationPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// Fails the first `failures` sends, then accepts.
pub struct FlakyChannel {
    remaining_failures: AtomicUsize,
    attempts: Mutex<Vec<NotificationPayload>>,
}

impl FlakyChannel {
    pub fn new(failures: usize) -> Self {
        Self {
            remaining_failures: AtomicUsize::new(failures),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<NotificationPayload> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for FlakyChannel {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        self.attempts.lock().unwrap().push(payload.clone());
        let failing = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            Err(NotifyError::Transport("connection reset".into()))
        } else {
            Ok(())
        }
    }
}

/// Blocks every send until released.
#[derive(Default)]
pub struct GatedChannel {
    pub entered: Notify,
    pub release: Notify,
    calls: AtomicUsize,
}

impl GatedChannel {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationChannel for GatedChannel {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn send(&self, _payload: &NotificationPayload) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}
