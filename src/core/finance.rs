//! Savings projection for delivery costs.

use chrono::NaiveTime;
use tracing::{debug, info, warn};

use crate::{
    domain::{parse_amount, parse_due_date, ExpenseCategory, FinancialPlan},
    errors::Result,
    storage::{load_json, save_json, KeyValueStore, Stored, FINANCIAL_PLAN_KEY},
};

use super::{clock::Clock, LoadSource};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Owns the financial plan and derives totals and savings targets from it.
pub struct FinancialPlanner {
    plan: FinancialPlan,
    clock: Box<dyn Clock>,
}

impl FinancialPlanner {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            plan: FinancialPlan::default(),
            clock,
        }
    }

    pub fn plan(&self) -> &FinancialPlan {
        &self.plan
    }

    /// Sets the due date from `YYYY-MM-DD`; blank or malformed input clears it.
    pub fn set_due_date(&mut self, input: &str) {
        self.plan.due_date = parse_due_date(input);
        if self.plan.due_date.is_none() && !input.trim().is_empty() {
            warn!(input, "unparsable due date, clearing");
        }
        debug!(due_date = ?self.plan.due_date, "set due date");
    }

    pub fn set_target_saving(&mut self, input: &str) {
        self.plan.target_saving = parse_amount(input);
        debug!(target = self.plan.target_saving, "set target saving");
    }

    pub fn set_current_saving(&mut self, input: &str) {
        self.plan.current_saving = parse_amount(input);
        debug!(current = self.plan.current_saving, "set current saving");
    }

    pub fn update_expense(&mut self, category: ExpenseCategory, input: &str) {
        let amount = parse_amount(input);
        self.plan.expenses.set(category, amount);
        debug!(%category, amount, "updated expense");
    }

    pub fn total_expenses(&self) -> f64 {
        self.plan.expenses.total()
    }

    /// Whole days left until the due date (partial days round up), never negative.
    /// Reads the clock on every call.
    pub fn remaining_days(&self) -> u32 {
        let Some(due_date) = self.plan.due_date else {
            return 0;
        };
        let due = due_date.and_time(NaiveTime::MIN);
        let now = self.clock.now().naive_utc();
        let millis = (due - now).num_milliseconds() as f64;
        (millis / MILLIS_PER_DAY).ceil().max(0.0) as u32
    }

    /// Amount to set aside per remaining day; `0.0` once no days remain.
    pub fn daily_savings_target(&self) -> f64 {
        match self.remaining_days() {
            0 => 0.0,
            days => self.total_expenses() / f64::from(days),
        }
    }

    pub fn remaining_to_save(&self) -> f64 {
        (self.plan.target_saving - self.plan.current_saving).max(0.0)
    }

    /// Share of the savings target already saved, in `[0, 100]`.
    pub fn savings_progress(&self) -> f64 {
        if self.plan.target_saving <= 0.0 {
            return 0.0;
        }
        (self.plan.current_saving / self.plan.target_saving * 100.0).clamp(0.0, 100.0)
    }

    pub fn reset(&mut self) {
        self.plan = FinancialPlan::default();
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        save_json(store, FINANCIAL_PLAN_KEY, &self.plan)?;
        info!(
            total = self.total_expenses(),
            target = self.plan.target_saving,
            "saved financial plan"
        );
        Ok(())
    }

    pub fn load(&mut self, store: &dyn KeyValueStore) -> LoadSource {
        match load_json::<FinancialPlan>(store, FINANCIAL_PLAN_KEY) {
            Stored::Found(plan) => {
                self.plan = plan.sanitized();
                info!(total = self.total_expenses(), "restored financial plan");
                LoadSource::Restored
            }
            Stored::Missing => {
                self.reset();
                LoadSource::Seeded
            }
            Stored::Unreadable(reason) => {
                warn!(%reason, "stored financial plan unreadable, using defaults");
                self.reset();
                LoadSource::Recovered
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::{core::clock::FixedClock, storage::MemoryStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    fn planner() -> FinancialPlanner {
        FinancialPlanner::new(Box::new(FixedClock::at_date(today())))
    }

    fn iso(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    #[test]
    fn scenario_six_hundred_over_ten_days() {
        let mut finance = planner();
        for (category, amount) in [
            (ExpenseCategory::Transport, "100"),
            (ExpenseCategory::Facility, "200"),
            (ExpenseCategory::Supplies, "50"),
            (ExpenseCategory::Emergency, "150"),
            (ExpenseCategory::Postpartum, "100"),
        ] {
            finance.update_expense(category, amount);
        }
        finance.set_due_date(&iso(today() + Duration::days(10)));
        assert_eq!(finance.total_expenses(), 600.0);
        assert_eq!(finance.remaining_days(), 10);
        assert_eq!(finance.daily_savings_target(), 60.0);
    }

    #[test]
    fn partial_days_round_up() {
        let noon = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        let mut finance = FinancialPlanner::new(Box::new(FixedClock(noon)));
        finance.set_due_date("2025-05-11");
        assert_eq!(finance.remaining_days(), 10);
        finance.set_due_date("2025-05-01");
        assert_eq!(finance.remaining_days(), 0);
    }

    #[test]
    fn unset_or_past_due_date_means_no_daily_target() {
        let mut finance = planner();
        finance.update_expense(ExpenseCategory::Facility, "900");
        assert_eq!(finance.remaining_days(), 0);
        assert_eq!(finance.daily_savings_target(), 0.0);

        finance.set_due_date(&iso(today() - Duration::days(3)));
        assert_eq!(finance.remaining_days(), 0);
        assert_eq!(finance.daily_savings_target(), 0.0);
    }

    #[test]
    fn garbage_input_becomes_zero() {
        let mut finance = planner();
        finance.set_target_saving("lots");
        finance.set_current_saving("-20");
        finance.update_expense(ExpenseCategory::Supplies, "");
        assert_eq!(finance.plan().target_saving, 0.0);
        assert_eq!(finance.plan().current_saving, 0.0);
        assert_eq!(finance.total_expenses(), 0.0);

        finance.set_due_date("next tuesday");
        assert_eq!(finance.plan().due_date, None);
    }

    #[test]
    fn remaining_to_save_never_negative() {
        let mut finance = planner();
        for (target, current, expected) in [
            ("500", "200", 300.0),
            ("200", "500", 0.0),
            ("0", "0", 0.0),
            ("0", "50", 0.0),
        ] {
            finance.set_target_saving(target);
            finance.set_current_saving(current);
            assert_eq!(finance.remaining_to_save(), expected);
        }
    }

    #[test]
    fn savings_progress_guards_zero_target() {
        let mut finance = planner();
        finance.set_current_saving("80");
        assert_eq!(finance.savings_progress(), 0.0);
        finance.set_target_saving("320");
        assert_eq!(finance.savings_progress(), 25.0);
        finance.set_current_saving("1000");
        assert_eq!(finance.savings_progress(), 100.0);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let store = MemoryStore::new();
        let mut finance = planner();
        finance.set_due_date("2025-07-04");
        finance.set_target_saving("750.5");
        finance.set_current_saving("120");
        finance.update_expense(ExpenseCategory::Emergency, "150");
        finance.save(&store).unwrap();
        let saved = finance.plan().clone();

        let mut restored = planner();
        assert_eq!(restored.load(&store), LoadSource::Restored);
        assert_eq!(restored.plan(), &saved);
    }

    #[test]
    fn long_decimal_amounts_survive_save_and_load() {
        let store = MemoryStore::new();
        let mut finance = planner();
        finance.set_target_saving("9900061.271705465");
        finance.set_current_saving("0.1234567890123456");
        finance.update_expense(ExpenseCategory::Facility, "123456.78901234567");
        finance.save(&store).unwrap();

        let mut restored = planner();
        assert_eq!(restored.load(&store), LoadSource::Restored);
        assert_eq!(restored.plan(), finance.plan());
        assert_eq!(restored.plan().target_saving, 9900061.271705465);
    }

    #[test]
    fn loaded_negative_values_are_clamped() {
        let store = MemoryStore::new();
        store
            .set_item(
                FINANCIAL_PLAN_KEY,
                r#"{"dueDate":null,"targetSaving":-10,"currentSaving":5,"expenses":{"transport":-3}}"#,
            )
            .unwrap();
        let mut finance = planner();
        assert_eq!(finance.load(&store), LoadSource::Restored);
        assert_eq!(finance.plan().target_saving, 0.0);
        assert_eq!(finance.plan().current_saving, 5.0);
        assert_eq!(finance.plan().expenses.transport, 0.0);
    }
}
