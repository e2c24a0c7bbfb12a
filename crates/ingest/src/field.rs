//! Closed field vocabulary shared by both intake forms.
//!
//! Every field any form can carry is a variant of [`Field`]. Form schemas
//! pick an ordered subset of these variants, and the validator, snapshot
//! builder, text builder, and renderer all iterate that same list. Looking a
//! field up by an arbitrary string is only possible through [`Field::from_str`],
//! which rejects anything outside the vocabulary.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! declare_fields {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A field key from the fixed intake vocabulary.
        ///
        /// The wire name (see [`Field::name`]) matches the form control name
        /// used by the notification payload and JSON input.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Field {
            $($variant),+
        }

        impl Field {
            /// Every field in declaration order.
            pub const ALL: &'static [Field] = &[$(Field::$variant),+];

            /// Stable wire name of the field.
            pub fn name(self) -> &'static str {
                match self {
                    $(Field::$variant => $name),+
                }
            }
        }
    };
}

declare_fields! {
    FromName => "from_name",
    Company => "company",
    UserEmail => "user_email",
    UserPhone => "user_phone",
    Timezone => "timezone",
    Location => "location",
    ProjectName => "project_name",
    CurrentWebsite => "current_website",
    ProjectSummary => "project_summary",
    ProjectTypes => "project_type_selected",
    ProjectTypeOther => "project_type_other",
    Goals => "goals_selected",
    PrimaryObjective => "primary_objective",
    PrimaryObjectiveOther => "primary_objective_other",
    ProjectDescription => "project_description",
    Services => "services_selected",
    PagesScreens => "pages_screens",
    RequiredFeatures => "required_features",
    OutOfScope => "out_of_scope",
    PhaseTwo => "phase_two",
    DesignDirection => "design_direction",
    ContentOwner => "content_owner",
    ContentDeadline => "content_deadline",
    BudgetRange => "budget_range",
    Deadline => "deadline",
    Availability => "availability",
    Notes => "notes",
    TargetStart => "target_start",
    TargetEnd => "target_end",
    Budget => "budget",
    BillingModel => "billing_model",
    Milestones => "milestones",
    AccessProvided => "access_provided",
    ThirdPartyCosts => "third_party_costs",
    AckPaid => "ack_paid",
    AckNoDev => "ack_no_dev",
    AckScope => "ack_scope",
    AckChanges => "ack_changes",
    AckRevisions => "ack_revisions",
    AckDelays => "ack_delays",
    AckStart => "ack_start",
    AckCosts => "ack_costs",
    Signature => "signature",
    SignedDate => "signed_date",
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name a known field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field name `{0}`")]
pub struct UnknownFieldName(pub String);

impl FromStr for Field {
    type Err = UnknownFieldName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownFieldName(s.to_string()))
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An insertion-ordered set of selected catalog labels.
///
/// Toggling a label that is already present removes it; toggling a new label
/// appends it. Order of first selection is what the canonical text and the
/// rendered document print, so it is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SelectionSet {
    labels: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the label if absent, removes it if present. Returns whether the
    /// label is selected afterwards.
    pub fn toggle(&mut self, label: &str) -> bool {
        if let Some(pos) = self.labels.iter().position(|l| l == label) {
            self.labels.remove(pos);
            false
        } else {
            self.labels.push(label.to_string());
            true
        }
    }

    pub fn insert(&mut self, label: &str) {
        if !self.contains(label) {
            self.labels.push(label.to_string());
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

impl From<Vec<String>> for SelectionSet {
    fn from(values: Vec<String>) -> Self {
        let mut set = SelectionSet::new();
        for value in &values {
            set.insert(value);
        }
        set
    }
}

impl From<SelectionSet> for Vec<String> {
    fn from(set: SelectionSet) -> Self {
        set.labels
    }
}

/// A raw value held by the working input.
///
/// Deserializes untagged: a JSON string is text, an array is a selection, a
/// boolean is an acknowledgement flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Selection(SelectionSet),
    Flag(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for field in Field::ALL {
            let parsed: Field = field.name().parse().expect("known name");
            assert_eq!(parsed, *field);
        }
        assert!("confirm_email".parse::<Field>().is_err());
    }

    #[test]
    fn wire_names_are_unique() {
        let mut names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Field::ALL.len());
    }

    #[test]
    fn toggle_preserves_insertion_order() {
        let mut set = SelectionSet::new();
        assert!(set.toggle("Website"));
        assert!(set.toggle("Automation"));
        assert!(set.toggle("Web App"));
        assert!(!set.toggle("Automation"));
        assert!(set.toggle("Automation"));
        assert_eq!(set.as_slice(), ["Website", "Web App", "Automation"]);
    }

    #[test]
    fn selection_from_vec_drops_duplicates() {
        let set = SelectionSet::from(vec!["b".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(set.as_slice(), ["b", "a"]);
    }

    #[test]
    fn field_value_deserializes_untagged() {
        let text: FieldValue = serde_json::from_str("\"hello\"").expect("text");
        let list: FieldValue = serde_json::from_str("[\"x\", \"y\"]").expect("list");
        let flag: FieldValue = serde_json::from_str("true").expect("flag");

        assert_eq!(text, FieldValue::Text("hello".into()));
        assert!(matches!(list, FieldValue::Selection(ref s) if s.len() == 2));
        assert_eq!(flag, FieldValue::Flag(true));
    }
}
