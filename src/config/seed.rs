//! Immutable seed data injected into the planner at construction time.

use once_cell::sync::Lazy;

use crate::domain::{ChecklistCategory, ChecklistItem, EmergencyContact};

/// Role whose contact is designated to make care decisions.
pub const DECISION_MAKER_ROLE: &str = "Decision Maker";

/// Guidance shown alongside one part of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepSection {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

/// Seed state used when nothing has been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSeed {
    pub checklist: Vec<ChecklistItem>,
    pub contacts: Vec<EmergencyContact>,
    pub sections: Vec<PrepSection>,
}

static STANDARD_SEED: Lazy<PlannerSeed> = Lazy::new(build_standard_seed);

impl PlannerSeed {
    /// The stock birth preparedness plan: 15 checklist items, 5 contact roles.
    pub fn standard() -> Self {
        STANDARD_SEED.clone()
    }

    pub fn section(&self, id: &str) -> Option<&PrepSection> {
        self.sections.iter().find(|section| section.id == id)
    }
}

impl Default for PlannerSeed {
    fn default() -> Self {
        Self::standard()
    }
}

fn build_standard_seed() -> PlannerSeed {
    use ChecklistCategory::*;

    let checklist = [
        ("facility-research", "Research nearby health facilities", Facility),
        ("facility-visit", "Visit chosen facility in advance", Facility),
        ("facility-emergency", "Verify emergency services and opening hours", Facility),
        ("transport-primary", "Identify primary transport method", Transport),
        ("transport-backup", "Have a backup transport plan", Transport),
        ("transport-route", "Map out the route and estimate travel time", Transport),
        ("items-mother", "Pack mother's clothing and sanitary pads", Items),
        ("items-baby", "Pack baby clothes, diapers and blankets", Items),
        ("items-documents", "Keep ANC card and important documents ready", Items),
        ("support-companion", "Choose a birth companion", Support),
        ("support-childcare", "Arrange care for older children and the home", Support),
        ("support-blood-donor", "Identify a possible blood donor", Support),
        ("communication-plan", "Share the birth plan with family", Communication),
        ("communication-phone", "Keep phone charged and credited", Communication),
        ("communication-numbers", "Save health worker and taxi numbers", Communication),
    ]
    .into_iter()
    .map(|(id, text, category)| ChecklistItem::new(id, text, category))
    .collect();

    let contacts = [
        "Primary Healthcare Provider",
        "Backup Healthcare Provider",
        "Emergency Transport",
        "Support Person",
        DECISION_MAKER_ROLE,
    ]
    .into_iter()
    .map(|role| EmergencyContact::new(role, role == DECISION_MAKER_ROLE))
    .collect();

    let sections = vec![
        PrepSection {
            id: "facility",
            title: "Birth Facility",
            content: "Choose a health facility with skilled birth attendants. Consider distance, available services, and your preferences.",
        },
        PrepSection {
            id: "transport",
            title: "Transportation",
            content: "Plan your transportation to the health facility, including backup options for emergencies.",
        },
        PrepSection {
            id: "savings",
            title: "Financial Plan",
            content: "Calculate and save money for delivery costs, supplies, and emergency situations.",
        },
        PrepSection {
            id: "supplies",
            title: "Essential Items",
            content: "Prepare a delivery kit with all necessary items for you and your baby.",
        },
        PrepSection {
            id: "contacts",
            title: "Emergency Contacts",
            content: "Keep important contact numbers readily available for emergencies.",
        },
    ];

    PlannerSeed {
        checklist,
        contacts,
        sections,
    }
}
