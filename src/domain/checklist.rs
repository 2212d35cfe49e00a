//! Birth preparedness checklist entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::{Displayable, Identifiable};

/// A single preparedness task the user can tick off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub checked: bool,
    pub category: ChecklistCategory,
}

impl ChecklistItem {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        category: ChecklistCategory,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            checked: false,
            category,
        }
    }

    /// Flips the checked flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.checked = !self.checked;
        self.checked
    }
}

impl Identifiable for ChecklistItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for ChecklistItem {
    fn display_label(&self) -> String {
        let mark = if self.checked { "x" } else { " " };
        format!("[{}] {} ({})", mark, self.text, self.category)
    }
}

/// Groups checklist items by the part of the plan they cover.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChecklistCategory {
    Facility,
    Transport,
    Items,
    Support,
    Communication,
}

impl ChecklistCategory {
    pub const ALL: [ChecklistCategory; 5] = [
        ChecklistCategory::Facility,
        ChecklistCategory::Transport,
        ChecklistCategory::Items,
        ChecklistCategory::Support,
        ChecklistCategory::Communication,
    ];
}

impl fmt::Display for ChecklistCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChecklistCategory::Facility => "Facility",
            ChecklistCategory::Transport => "Transport",
            ChecklistCategory::Items => "Items",
            ChecklistCategory::Support => "Support",
            ChecklistCategory::Communication => "Communication",
        };
        f.write_str(label)
    }
}
