//! Injectable time source.
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, Utc};

/// Wall-clock and monotonic time for one session.
///
/// Wall-clock time dates identifiers and payloads; monotonic time measures
/// how long the form has been interactive.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn instant(&self) -> Instant;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    state: Mutex<(DateTime<Utc>, Instant)>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new((start, Instant::now())),
        }
    }

    /// Moves both wall-clock and monotonic time forward.
    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.0 += chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
        state.1 += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).0
    }

    fn instant(&self) -> Instant {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_advances_both_timelines() {
        let start = Utc.with_ymd_and_hms(2026, 1, 10, 23, 59, 58).unwrap();
        let clock = ManualClock::new(start);
        let before = clock.instant();

        clock.advance(Duration::from_secs(5));

        assert_eq!(clock.instant() - before, Duration::from_secs(5));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
    }
}
