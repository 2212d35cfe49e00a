//! Savings plan for delivery costs.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::PlannerError;

use super::common::sanitize_amount;

/// Financial preparation state. Totals and daily targets are derived, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialPlan {
    pub due_date: Option<NaiveDate>,
    pub target_saving: f64,
    pub current_saving: f64,
    pub expenses: Expenses,
}

impl FinancialPlan {
    /// Returns a copy with every monetary field clamped to a finite, non-negative value.
    pub fn sanitized(mut self) -> Self {
        self.target_saving = sanitize_amount(self.target_saving);
        self.current_saving = sanitize_amount(self.current_saving);
        for category in ExpenseCategory::ALL {
            let value = self.expenses.get(category);
            self.expenses.set(category, sanitize_amount(value));
        }
        self
    }
}

/// Expected costs, one amount per [`ExpenseCategory`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Expenses {
    pub transport: f64,
    pub facility: f64,
    pub supplies: f64,
    pub emergency: f64,
    pub postpartum: f64,
}

impl Expenses {
    pub fn get(&self, category: ExpenseCategory) -> f64 {
        match category {
            ExpenseCategory::Transport => self.transport,
            ExpenseCategory::Facility => self.facility,
            ExpenseCategory::Supplies => self.supplies,
            ExpenseCategory::Emergency => self.emergency,
            ExpenseCategory::Postpartum => self.postpartum,
        }
    }

    pub fn set(&mut self, category: ExpenseCategory, amount: f64) {
        let slot = match category {
            ExpenseCategory::Transport => &mut self.transport,
            ExpenseCategory::Facility => &mut self.facility,
            ExpenseCategory::Supplies => &mut self.supplies,
            ExpenseCategory::Emergency => &mut self.emergency,
            ExpenseCategory::Postpartum => &mut self.postpartum,
        };
        *slot = amount;
    }

    pub fn total(&self) -> f64 {
        ExpenseCategory::ALL
            .iter()
            .map(|category| self.get(*category))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Transport,
    Facility,
    Supplies,
    Emergency,
    Postpartum,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Transport,
        ExpenseCategory::Facility,
        ExpenseCategory::Supplies,
        ExpenseCategory::Emergency,
        ExpenseCategory::Postpartum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Facility => "facility",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Emergency => "emergency",
            ExpenseCategory::Postpartum => "postpartum",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ExpenseCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                PlannerError::InvalidInput(format!("unknown expense category `{}`", value.trim()))
            })
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
