use crate::domain::ChecklistCategory;

/// Point-in-time snapshot of every derived planner metric.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub checklist_progress: f64,
    pub checked_items: usize,
    pub total_items: usize,
    pub category_progress: Vec<(ChecklistCategory, f64)>,
    pub completed_contacts: usize,
    pub total_contacts: usize,
    pub decision_maker: Option<String>,
    pub total_expenses: f64,
    pub remaining_days: u32,
    pub daily_savings_target: f64,
    pub remaining_to_save: f64,
    pub savings_progress: f64,
}

impl PlanSummary {
    /// True once every checklist item is ticked and every contact is filled in.
    pub fn is_ready(&self) -> bool {
        self.total_items > 0
            && self.checked_items == self.total_items
            && self.completed_contacts == self.total_contacts
    }
}
