//! Human-readable submission identifiers.
//!
//! Format: `PREFIX-YYYYMMDD-RRRRRR`, where `RRRRRR` is six characters drawn
//! uniformly from `A-Z0-9`. There is no uniqueness check; the random suffix
//! gives 36^6 (about 2.2 billion) combinations per prefix and day.
use std::fmt;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Characters the random suffix is drawn from.
pub const SUFFIX_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const SUFFIX_LEN: usize = 6;
const MAX_PREFIX_LEN: usize = 16;

/// Source of uniform indices, injectable so tests can pin identifiers.
pub trait RandomSource: Send {
    /// Returns an index in `0..upper`.
    fn pick(&mut self, upper: usize) -> usize;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Deterministic generator for tests and benches.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, upper: usize) -> usize {
        self.0.gen_range(0..upper)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Draws a fresh identifier for `date`.
    pub fn generate(
        prefix: &str,
        date: NaiveDate,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, CanonicalError> {
        validate_prefix(prefix)?;
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.pick(SUFFIX_ALPHABET.len())] as char)
            .collect();
        Ok(Self(format!("{prefix}-{}-{suffix}", date.format("%Y%m%d"))))
    }

    /// Accepts only well-formed identifiers.
    pub fn parse(raw: &str) -> Result<Self, CanonicalError> {
        let malformed = || CanonicalError::MalformedId(raw.to_string());
        let mut parts = raw.splitn(3, '-');
        let (Some(prefix), Some(date), Some(suffix)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        validate_prefix(prefix).map_err(|_| malformed())?;
        if date.len() != 8 || NaiveDate::parse_from_str(date, "%Y%m%d").is_err() {
            return Err(malformed());
        }
        if suffix.len() != SUFFIX_LEN || !suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b)) {
            return Err(malformed());
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn prefix(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// The `YYYYMMDD` segment.
    pub fn date_segment(&self) -> &str {
        self.0.split('-').nth(1).unwrap_or_default()
    }
}

/// Prefixes are what config supplies, so they are checked up front.
pub fn validate_prefix(prefix: &str) -> Result<(), CanonicalError> {
    let ok = !prefix.is_empty()
        && prefix.len() <= MAX_PREFIX_LEN
        && prefix
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(CanonicalError::InvalidPrefix(prefix.to_string()))
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubmissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubmissionId {
    type Error = CanonicalError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<SubmissionId> for String {
    fn from(id: SubmissionId) -> Self {
        id.0
    }
}
