//! Intake canonical layer.
//!
//! Turns a frozen [`Snapshot`](ingest::Snapshot) into the artifacts that get
//! dispatched and printed: a [`SubmissionId`], the client and internal
//! [`CanonicalTexts`], and a SHA-256 [`Fingerprint`] binding the identifier to
//! the internal text. [`SubmissionRecord::seal`] ties them together.
//!
//! ## Pure function guarantee
//!
//! Apart from the injected [`RandomSource`], nothing here touches I/O, the
//! clock, or the locale. Same snapshot + same identifier = same texts and the
//! same fingerprint, on any machine.
//!
//! ## Invariants worth knowing
//!
//! - Fingerprint = SHA-256(identifier || "|" || internal_text), lowercase hex
//! - The internal text carries the identifier on its second line
//! - The client text never depends on the identifier
//! - Texts are `\n`-joined with no trailing newline

mod error;
mod hash;
mod id;
mod note;
mod record;
mod text;

pub use crate::error::CanonicalError;
pub use crate::hash::{fingerprint, hash_text, Fingerprint, FINGERPRINT_SEPARATOR};
pub use crate::id::{
    validate_prefix, RandomSource, SeededRandom, SubmissionId, ThreadRandom, SUFFIX_ALPHABET,
    SUFFIX_LEN,
};
pub use crate::note::ClientNote;
pub use crate::record::SubmissionRecord;
pub use crate::text::{
    internal_header, join_selection, CanonicalTexts, TextBuilder, EMPTY_SELECTION,
    SELECTION_SEPARATOR,
};
