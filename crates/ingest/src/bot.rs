//! Cheap client-side bot screening.
//!
//! Two signals: the hidden decoy field was filled in, or the form was
//! submitted faster than a person could plausibly fill it. A suspected bot is
//! answered with a fake success by the orchestrator and nothing is dispatched.
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::input::WorkingInput;

/// Default minimum time between the form becoming interactive and submit.
pub const DEFAULT_MIN_INTERACTION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotPolicy {
    pub enabled: bool,
    pub min_interaction_ms: u64,
}

impl Default for BotPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            min_interaction_ms: DEFAULT_MIN_INTERACTION.as_millis() as u64,
        }
    }
}

/// Why a submission looks automated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotSignal {
    DecoyFilled,
    TooFast { elapsed: Duration },
}

impl BotSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            BotSignal::DecoyFilled => "decoy_filled",
            BotSignal::TooFast { .. } => "too_fast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotVerdict {
    Human,
    Suspected(BotSignal),
}

impl BotVerdict {
    pub fn is_bot(&self) -> bool {
        matches!(self, BotVerdict::Suspected(_))
    }
}

impl BotPolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn min_interaction(&self) -> Duration {
        Duration::from_millis(self.min_interaction_ms)
    }

    /// Screens `input`, given how long the form has been interactive.
    pub fn check(&self, input: &WorkingInput, elapsed: Duration) -> BotVerdict {
        if !self.enabled {
            return BotVerdict::Human;
        }
        if !input.decoy().trim().is_empty() {
            return BotVerdict::Suspected(BotSignal::DecoyFilled);
        }
        if elapsed < self.min_interaction() {
            return BotVerdict::Suspected(BotSignal::TooFast { elapsed });
        }
        BotVerdict::Human
    }
}
