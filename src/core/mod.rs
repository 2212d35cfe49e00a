//! Planner state, derived metrics and the seams it talks through.

pub mod checklist;
pub mod clock;
pub mod contacts;
pub mod finance;
pub mod notify;
pub mod planner;
pub mod summary;

pub use checklist::ChecklistManager;
pub use clock::{Clock, FixedClock, SystemClock};
pub use contacts::ContactManager;
pub use finance::FinancialPlanner;
pub use notify::{NotificationKind, Notifier, RecordingNotifier, TracingNotifier};
pub use planner::BirthPrepPlanner;
pub use summary::PlanSummary;

use std::collections::HashMap;

use crate::domain::Identifiable;

/// Where a section's state came from on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read back from the store.
    Restored,
    /// Nothing stored yet; seed state in use.
    Seeded,
    /// Stored value was unreadable; seed state in use.
    Recovered,
}

/// Per-section outcome of [`BirthPrepPlanner::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub checklist: LoadSource,
    pub contacts: LoadSource,
    pub financial_plan: LoadSource,
}

impl LoadReport {
    pub fn any_recovered(&self) -> bool {
        [self.checklist, self.contacts, self.financial_plan].contains(&LoadSource::Recovered)
    }
}

/// Keys stored entries by their stable id; a later duplicate replaces an earlier one.
pub(crate) fn index_by_id<T: Identifiable>(entries: Vec<T>) -> HashMap<String, T> {
    entries
        .into_iter()
        .map(|entry| (entry.id().to_string(), entry))
        .collect()
}
