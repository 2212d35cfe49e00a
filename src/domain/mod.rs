//! Planner domain models and input parsing helpers.
//!
//! Pure data types: no I/O, no storage, no notification.

pub mod checklist;
pub mod common;
pub mod contact;
pub mod finance;

pub use checklist::{ChecklistCategory, ChecklistItem};
pub use common::{parse_amount, parse_due_date, Displayable, Identifiable};
pub use contact::{ContactField, EmergencyContact};
pub use finance::{ExpenseCategory, Expenses, FinancialPlan};
