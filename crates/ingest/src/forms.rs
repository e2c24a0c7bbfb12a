//! Field declarations for the Discovery and Scope of Work forms.
//!
//! Catalog constants are public so tests and front ends can offer exactly the
//! labels the validator accepts.
use crate::field::Field;
use crate::schema::{FieldSpec, FormKind, FormSchema, Rule, Section};

pub const PROJECT_TYPES: &[&str] = &[
    "Website",
    "Web App",
    "Mobile App",
    "Analytics / Tracking",
    "Automation",
    "Other",
];

pub const DISCOVERY_GOALS: &[&str] = &[
    "Lead generation",
    "Increase sales",
    "Improve conversion rate",
    "Automation / efficiency",
    "Internal dashboard",
    "Other",
];

pub const DISCOVERY_SERVICES: &[&str] = &[
    "Custom website",
    "Website redesign",
    "Backend / API development",
    "Database design",
    "Authentication",
    "Android app",
    "iOS app",
    "GA4 + GTM setup",
    "Dashboards / reporting",
    "Automation / integrations",
    "Maintenance",
];

pub const AVAILABILITY: &[&str] = &[
    "1–2 hours / week",
    "3–5 hours / week",
    "5–10 hours / week",
    "Flexible / as needed",
];

pub const PRIMARY_OBJECTIVES: &[&str] = &[
    "Website Development",
    "Website Redesign",
    "Lead generation",
    "Product / service sales",
    "Internal tooling",
    "Automation / efficiency",
    "Analytics & insights",
    "Mobile application",
    "Other",
];

pub const SOW_SERVICES: &[&str] = &[
    "Custom website",
    "Website redesign",
    "Single-page application (SPA)",
    "Backend / API development",
    "Database design / migration",
    "Authentication / user accounts",
    "Android app",
    "iOS app",
    "App store deployment",
    "GA4 + GTM setup",
    "Conversion tracking",
    "Dashboards / reporting",
    "Workflow automation",
    "API integrations",
    "Ongoing maintenance",
];

pub const DESIGN_DIRECTIONS: &[&str] = &[
    "Minimal / clean",
    "Professional / corporate",
    "Custom / branded",
    "Developer-focused",
];

pub const CONTENT_OWNERS: &[&str] = &[
    "Client provides all content",
    "Mix of client + consultant",
    "Consultant assists with content",
];

pub const BILLING_MODELS: &[&str] = &["Fixed-price", "Hourly", "Retainer"];

pub const ACCESS_OPTIONS: &[&str] = &[
    "Domain registrar access",
    "Hosting provider access",
    "Analytics account access",
    "Repository access",
    "API keys access",
];

pub const THIRD_PARTY_COSTS: &[&str] = &[
    "Client responsible for ongoing hosting/domains/subscriptions",
    "Included only if explicitly stated in proposal",
];

fn client_section(with_location: bool) -> Section {
    let mut fields = vec![
        FieldSpec::text(Field::FromName, "Name").rule(Rule::Required, "Name is required."),
        FieldSpec::text(Field::Company, "Company"),
        FieldSpec::text(Field::UserEmail, "Email").rule(Rule::Email, "Valid email is required."),
        FieldSpec::text(Field::UserPhone, "Phone"),
        FieldSpec::text(Field::Timezone, "Time Zone").rule(Rule::Required, "Time zone is required."),
    ];
    if with_location {
        fields.push(FieldSpec::text(Field::Location, "Location"));
    }
    Section::new("Client", fields)
}

fn signature_section() -> Section {
    Section::new(
        "Signature",
        vec![
            FieldSpec::text(Field::Signature, "Signature")
                .rule(Rule::Required, "Signature required."),
            FieldSpec::date(Field::SignedDate, "Signed Date").rule(Rule::Required, "Date required."),
        ],
    )
}

impl FormSchema {
    /// The paid Discovery intake.
    pub fn discovery() -> Self {
        FormSchema::new(
            FormKind::Discovery,
            vec![
                client_section(false),
                Section::new(
                    "Project",
                    vec![
                        FieldSpec::text(Field::ProjectName, "Project Name")
                            .rule(Rule::Required, "Project name is required."),
                        FieldSpec::text(Field::CurrentWebsite, "Current Website"),
                        FieldSpec::long_text(Field::ProjectSummary, "Project Summary")
                            .rule(Rule::MinLength(20), "Summary is too short."),
                    ],
                ),
                Section::new(
                    "Selections",
                    vec![
                        FieldSpec::selection(Field::ProjectTypes, "Project Type(s)", PROJECT_TYPES)
                            .rule(Rule::Required, "Select at least one."),
                        FieldSpec::text(Field::ProjectTypeOther, "Other Project Type").rule(
                            Rule::RequiredIfOther(Field::ProjectTypes),
                            "Describe the other project type.",
                        ),
                        FieldSpec::selection(Field::Goals, "Goals", DISCOVERY_GOALS)
                            .rule(Rule::Required, "Select at least one."),
                        FieldSpec::selection(
                            Field::Services,
                            "Services Requested",
                            DISCOVERY_SERVICES,
                        )
                        .rule(Rule::Required, "Select at least one."),
                    ],
                ),
                Section::new(
                    "Budget + Timing",
                    vec![
                        FieldSpec::text(Field::BudgetRange, "Budget Range")
                            .rule(Rule::Required, "Budget is required."),
                        FieldSpec::date(Field::Deadline, "Timeline / Deadline"),
                        FieldSpec::choice(Field::Availability, "Availability", AVAILABILITY)
                            .rule(Rule::Required, "Availability is required."),
                        FieldSpec::long_text(Field::Notes, "Notes / Extra Context"),
                    ],
                ),
                Section::new(
                    "Acknowledgements",
                    vec![
                        FieldSpec::acknowledgement(
                            Field::AckPaid,
                            "Discovery is a paid planning stage",
                        ),
                        FieldSpec::acknowledgement(
                            Field::AckNoDev,
                            "Discovery does not include final development work",
                        ),
                        FieldSpec::acknowledgement(
                            Field::AckScope,
                            "This submission defines the basis for the proposal scope",
                        ),
                    ],
                ),
                signature_section(),
            ],
        )
    }

    /// The post-discovery Scope of Work submission.
    pub fn scope_of_work() -> Self {
        FormSchema::new(
            FormKind::ScopeOfWork,
            vec![
                client_section(true),
                Section::new(
                    "Project",
                    vec![
                        FieldSpec::text(Field::ProjectName, "Project Name")
                            .rule(Rule::Required, "Project name is required."),
                        FieldSpec::choice(
                            Field::PrimaryObjective,
                            "Primary Objective",
                            PRIMARY_OBJECTIVES,
                        )
                        .rule(Rule::Required, "Required."),
                        FieldSpec::text(Field::PrimaryObjectiveOther, "Other Objective").rule(
                            Rule::RequiredIfOther(Field::PrimaryObjective),
                            "Describe the primary objective.",
                        ),
                        FieldSpec::long_text(Field::ProjectDescription, "Project Description")
                            .rule(Rule::MinLength(20), "Description is too short."),
                    ],
                ),
                Section::new(
                    "Services",
                    vec![FieldSpec::selection(
                        Field::Services,
                        "Services Included",
                        SOW_SERVICES,
                    )
                    .rule(Rule::Required, "Select at least one service.")],
                ),
                Section::new(
                    "Requirements",
                    vec![
                        FieldSpec::long_text(Field::PagesScreens, "Pages / Screens"),
                        FieldSpec::long_text(Field::RequiredFeatures, "Required Features")
                            .rule(Rule::MinLength(10), "Required features is too short."),
                        FieldSpec::long_text(Field::OutOfScope, "Out of Scope"),
                        FieldSpec::long_text(Field::PhaseTwo, "Phase 2 / Future Ideas"),
                    ],
                ),
                Section::new(
                    "Design & Content",
                    vec![
                        FieldSpec::choice(
                            Field::DesignDirection,
                            "Design Direction",
                            DESIGN_DIRECTIONS,
                        ),
                        FieldSpec::choice(
                            Field::ContentOwner,
                            "Content Responsibility",
                            CONTENT_OWNERS,
                        ),
                        FieldSpec::date(Field::ContentDeadline, "Content Deadline"),
                    ],
                ),
                Section::new(
                    "Timeline & Budget",
                    vec![
                        FieldSpec::date(Field::TargetStart, "Target Start"),
                        FieldSpec::date(Field::TargetEnd, "Target Completion"),
                        FieldSpec::text(Field::Budget, "Budget Range")
                            .rule(Rule::Required, "Budget is required."),
                        FieldSpec::choice(Field::BillingModel, "Billing Model", BILLING_MODELS)
                            .rule(Rule::Required, "Billing model is required."),
                        FieldSpec::long_text(Field::Milestones, "Milestones"),
                    ],
                ),
                Section::new(
                    "Access & Costs",
                    vec![
                        FieldSpec::selection(
                            Field::AccessProvided,
                            "Access Needed",
                            ACCESS_OPTIONS,
                        ),
                        FieldSpec::choice(
                            Field::ThirdPartyCosts,
                            "Third-Party Costs",
                            THIRD_PARTY_COSTS,
                        )
                        .rule(
                            Rule::Required,
                            "Third-party costs acknowledgement required.",
                        ),
                    ],
                ),
                Section::new(
                    "Acknowledgements",
                    vec![
                        FieldSpec::acknowledgement(
                            Field::AckScope,
                            "This Scope of Work reflects the full agreed scope",
                        ),
                        FieldSpec::acknowledgement(
                            Field::AckChanges,
                            "Scope changes may require revised pricing and timeline",
                        ),
                        FieldSpec::acknowledgement(
                            Field::AckRevisions,
                            "Standard 2 rounds of revisions (unless otherwise agreed)",
                        ),
                        FieldSpec::acknowledgement(
                            Field::AckDelays,
                            "Delays in feedback/content will shift the timeline",
                        ),
                        FieldSpec::acknowledgement(
                            Field::AckStart,
                            "Work begins only after proposal approval + deposit",
                        ),
                        FieldSpec::acknowledgement(
                            Field::AckCosts,
                            "Third-party costs are billed separately unless stated",
                        ),
                    ],
                ),
                signature_section(),
            ],
        )
    }
}
