//! Client acknowledgement wording.
use ingest::{Field, FormKind, Snapshot};

const NOT_PROVIDED: &str = "(not provided)";

/// Templates for the message sent back to the submitter.
///
/// Only the sign-off is configurable; everything else is fixed per form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientNote {
    sender: String,
}

impl ClientNote {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Builds the acknowledgement lines for `snapshot`.
    pub fn lines(&self, snapshot: &Snapshot) -> Vec<String> {
        let name = or(snapshot.text(Field::FromName), "there");
        let project = or(snapshot.text(Field::ProjectName), NOT_PROVIDED);

        let (thanks, budget, timeline, steps) = match snapshot.kind() {
            FormKind::Discovery => (
                "Thanks for submitting the Discovery Intake form — I've received everything.",
                or(snapshot.text(Field::BudgetRange), NOT_PROVIDED),
                or(snapshot.text(Field::Deadline), NOT_PROVIDED).to_string(),
                [
                    "1) I'll review your details and follow up with any clarifying questions.",
                    "2) If everything looks good, I'll send the Discovery invoice / scheduling details.",
                ],
            ),
            FormKind::ScopeOfWork => (
                "Thanks — I received your Scope of Work submission.",
                or(snapshot.text(Field::Budget), NOT_PROVIDED),
                format!(
                    "{} → {}",
                    or(snapshot.text(Field::TargetStart), "(start TBD)"),
                    or(snapshot.text(Field::TargetEnd), "(completion TBD)")
                ),
                [
                    "1) I'll review this SOW and confirm anything that needs clarification.",
                    "2) You'll receive a proposal + deposit request to begin work.",
                ],
            ),
        };

        vec![
            format!("Hi {name},"),
            String::new(),
            thanks.to_string(),
            String::new(),
            format!("Project: {project}"),
            format!("Budget: {budget}"),
            format!("Timeline: {timeline}"),
            String::new(),
            "Next steps:".to_string(),
            steps[0].to_string(),
            steps[1].to_string(),
            String::new(),
            format!("— {}", self.sender),
        ]
    }
}

fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
