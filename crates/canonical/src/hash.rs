//! Submission fingerprints.
//!
//! # Algorithm
//!
//! ```text
//! SHA-256(identifier_bytes || "|" || internal_text_bytes) -> lowercase hex
//! ```
//!
//! The digest is unkeyed. Binding the identifier into the hash means two
//! submissions with identical field values still get different fingerprints.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{fingerprint, hash_text, SubmissionId};
//!
//! let id = SubmissionId::parse("DISC-20260110-AB12CD").unwrap();
//! let fp = fingerprint(&id, "=== DISCOVERY INTAKE (Internal Record) ===");
//! assert_eq!(fp.as_str().len(), 64);
//! assert_eq!(
//!     fp.as_str(),
//!     hash_text("DISC-20260110-AB12CD|=== DISCOVERY INTAKE (Internal Record) ===")
//! );
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::id::SubmissionId;

/// Separator between identifier and text in the hashed message.
pub const FINGERPRINT_SEPARATOR: &str = "|";

/// A 64-character lowercase hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first `chars` hex digits followed by `...`, or the whole digest
    /// when it is not longer than `chars`.
    pub fn preview(&self, chars: usize) -> String {
        if chars >= self.0.len() {
            self.0.clone()
        } else {
            format!("{}...", &self.0[..chars])
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint of `internal_text` under `id`.
pub fn fingerprint(id: &SubmissionId, internal_text: &str) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(id.as_str().as_bytes());
    hasher.update(FINGERPRINT_SEPARATOR.as_bytes());
    hasher.update(internal_text.as_bytes());
    Fingerprint(hex::encode(hasher.finalize()))
}

/// Plain SHA-256 of `text` as lowercase hex.
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
