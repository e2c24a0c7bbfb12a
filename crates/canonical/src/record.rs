use serde::Serialize;

use crate::hash::{fingerprint, Fingerprint};
use crate::id::SubmissionId;
use crate::text::CanonicalTexts;

/// Identifier, fingerprint, and the two texts of one submission attempt.
///
/// Fields are private and there are no setters: the only way to get a record
/// with a different identifier or text is to [`seal`](Self::seal) a new one,
/// which recomputes the fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    id: SubmissionId,
    fingerprint: Fingerprint,
    client_text: String,
    internal_text: String,
}

impl SubmissionRecord {
    pub fn seal(id: SubmissionId, texts: CanonicalTexts) -> Self {
        let fingerprint = fingerprint(&id, &texts.internal);
        Self {
            id,
            fingerprint,
            client_text: texts.client,
            internal_text: texts.internal,
        }
    }

    pub fn id(&self) -> &SubmissionId {
        &self.id
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn client_text(&self) -> &str {
        &self.client_text
    }

    pub fn internal_text(&self) -> &str {
        &self.internal_text
    }
}
