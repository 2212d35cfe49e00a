//! Facade that ties the three planner sections to a store and a notifier.

use tracing::{debug, info, warn};

use crate::{
    config::PlannerSeed,
    domain::{ChecklistCategory, ContactField, ExpenseCategory},
    errors::Result,
    storage::KeyValueStore,
};

use super::{
    checklist::ChecklistManager,
    clock::{Clock, SystemClock},
    contacts::ContactManager,
    finance::FinancialPlanner,
    notify::{NotificationKind, Notifier, TracingNotifier},
    summary::PlanSummary,
    LoadReport,
};

/// Owns the checklist, contacts and financial plan for a single user.
///
/// State is restored once via [`load`](Self::load) and written back only on
/// explicit `save_*` calls.
pub struct BirthPrepPlanner {
    seed: PlannerSeed,
    checklist: ChecklistManager,
    contacts: ContactManager,
    finance: FinancialPlanner,
    store: Box<dyn KeyValueStore>,
    notifier: Box<dyn Notifier>,
    loaded: bool,
}

impl BirthPrepPlanner {
    pub fn new(
        seed: PlannerSeed,
        store: Box<dyn KeyValueStore>,
        notifier: Box<dyn Notifier>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            checklist: ChecklistManager::new(seed.checklist.clone()),
            contacts: ContactManager::new(seed.contacts.clone()),
            finance: FinancialPlanner::new(clock),
            seed,
            store,
            notifier,
            loaded: false,
        }
    }

    /// Standard seed, system clock and tracing notifications.
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self::new(
            PlannerSeed::standard(),
            store,
            Box::new(TracingNotifier),
            Box::new(SystemClock),
        )
    }

    pub fn seed(&self) -> &PlannerSeed {
        &self.seed
    }

    pub fn checklist(&self) -> &ChecklistManager {
        &self.checklist
    }

    pub fn contacts(&self) -> &ContactManager {
        &self.contacts
    }

    pub fn finance(&self) -> &FinancialPlanner {
        &self.finance
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Restores all three sections the first time it is called; later calls are no-ops.
    pub fn load(&mut self) -> Option<LoadReport> {
        if self.loaded {
            debug!("planner already loaded");
            return None;
        }
        Some(self.reload())
    }

    /// Restores all three sections from the store, discarding unsaved edits.
    pub fn reload(&mut self) -> LoadReport {
        let store = self.store.as_ref();
        let report = LoadReport {
            checklist: self.checklist.load(store),
            contacts: self.contacts.load(store),
            financial_plan: self.finance.load(store),
        };
        self.loaded = true;
        info!(?report, "planner loaded");
        if report.any_recovered() {
            self.notifier.notify(
                "Some saved data could not be read and was reset",
                NotificationKind::Info,
            );
        }
        report
    }

    pub fn toggle_item(&mut self, id: &str) -> Result<bool> {
        let result = self.checklist.toggle_item(id);
        self.report_failure(result)
    }

    pub fn update_contact(&mut self, index: usize, field: ContactField, value: &str) -> Result<()> {
        let result = self.contacts.update_contact(index, field, value);
        let outcome = self.report_failure(result);
        if outcome.is_ok() {
            self.notifier
                .notify("Contact updated successfully", NotificationKind::Success);
        }
        outcome
    }

    /// Like [`update_contact`](Self::update_contact) with the field given by name.
    pub fn update_contact_field(&mut self, index: usize, field: &str, value: &str) -> Result<()> {
        let parsed = field.parse::<ContactField>();
        let field = self.report_failure(parsed)?;
        self.update_contact(index, field, value)
    }

    pub fn set_due_date(&mut self, input: &str) {
        self.finance.set_due_date(input);
    }

    pub fn set_target_saving(&mut self, input: &str) {
        self.finance.set_target_saving(input);
    }

    pub fn set_current_saving(&mut self, input: &str) {
        self.finance.set_current_saving(input);
    }

    pub fn update_expense(&mut self, category: ExpenseCategory, input: &str) {
        self.finance.update_expense(category, input);
    }

    pub fn save_checklist(&self) -> Result<()> {
        let result = self.checklist.save(self.store.as_ref());
        self.report_save(result, "Checklist progress saved")
    }

    pub fn save_contacts(&self) -> Result<()> {
        let result = self.contacts.save(self.store.as_ref());
        self.report_save(result, "Emergency contacts saved")
    }

    pub fn save_financial_plan(&self) -> Result<()> {
        let result = self.finance.save(self.store.as_ref());
        self.report_save(result, "Financial plan saved")
    }

    /// Saves every section, stopping at the first failure.
    pub fn save_all(&self) -> Result<()> {
        self.save_checklist()?;
        self.save_contacts()?;
        self.save_financial_plan()
    }

    /// Returns every section to its seed state in memory. Nothing is persisted.
    pub fn reset(&mut self) {
        self.checklist.reset();
        self.contacts.reset();
        self.finance.reset();
        self.notifier
            .notify("Birth plan reset to defaults", NotificationKind::Info);
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            checklist_progress: self.checklist.progress(),
            checked_items: self.checklist.checked_count(),
            total_items: self.checklist.items().len(),
            category_progress: ChecklistCategory::ALL
                .iter()
                .map(|category| (*category, self.checklist.category_progress(*category)))
                .collect(),
            completed_contacts: self.contacts.completed_count(),
            total_contacts: self.contacts.contacts().len(),
            decision_maker: self
                .contacts
                .decision_maker()
                .map(|contact| contact.name.clone())
                .filter(|name| !name.trim().is_empty()),
            total_expenses: self.finance.total_expenses(),
            remaining_days: self.finance.remaining_days(),
            daily_savings_target: self.finance.daily_savings_target(),
            remaining_to_save: self.finance.remaining_to_save(),
            savings_progress: self.finance.savings_progress(),
        }
    }

    fn report_failure<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            warn!(%err, "planner update rejected");
            self.notifier.notify(&err.to_string(), NotificationKind::Error);
        }
        result
    }

    fn report_save(&self, result: Result<()>, success: &str) -> Result<()> {
        match result {
            Ok(()) => {
                self.notifier.notify(success, NotificationKind::Success);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "save failed");
                self.notifier
                    .notify(&format!("Save failed: {}", err), NotificationKind::Error);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for BirthPrepPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BirthPrepPlanner")
            .field("loaded", &self.loaded)
            .field("checklist", &self.checklist)
            .field("contacts", &self.contacts)
            .field("financial_plan", self.finance.plan())
            .finish_non_exhaustive()
    }
}

