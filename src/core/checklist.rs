//! Checklist state: toggling items and measuring progress.

use tracing::{debug, info, warn};

use crate::{
    domain::{ChecklistCategory, ChecklistItem},
    errors::{PlannerError, Result},
    storage::{load_json, save_json, KeyValueStore, Stored, CHECKLIST_KEY},
};

use super::{index_by_id, LoadSource};

/// Owns the checklist items. Items come from the seed and are never added or removed.
#[derive(Debug, Clone)]
pub struct ChecklistManager {
    seed: Vec<ChecklistItem>,
    items: Vec<ChecklistItem>,
}

impl ChecklistManager {
    pub fn new(seed: Vec<ChecklistItem>) -> Self {
        Self {
            items: seed.clone(),
            seed,
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Flips the item with `id` and returns its new checked state.
    pub fn toggle_item(&mut self, id: &str) -> Result<bool> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| PlannerError::ItemNotFound(id.to_string()))?;
        let checked = item.toggle();
        debug!(id, checked, "toggled checklist item");
        Ok(checked)
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }

    /// Percentage of checked items, `0.0` for an empty checklist.
    pub fn progress(&self) -> f64 {
        percentage(self.checked_count(), self.items.len())
    }

    /// Same as [`progress`](Self::progress) restricted to one category.
    pub fn category_progress(&self, category: ChecklistCategory) -> f64 {
        let (checked, total) = self
            .items
            .iter()
            .filter(|item| item.category == category)
            .fold((0, 0), |(checked, total), item| {
                (checked + usize::from(item.checked), total + 1)
            });
        percentage(checked, total)
    }

    /// Restores the seed list with every item unchecked.
    pub fn reset(&mut self) {
        self.items = self.seed.clone();
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        save_json(store, CHECKLIST_KEY, &self.items)?;
        info!(
            checked = self.checked_count(),
            total = self.items.len(),
            "saved checklist"
        );
        Ok(())
    }

    /// Replaces in-memory state with the stored list, falling back to the seed.
    ///
    /// Stored items are matched to seed items by id: the seed supplies text and
    /// category, the stored copy supplies `checked`.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> LoadSource {
        match load_json::<Vec<ChecklistItem>>(store, CHECKLIST_KEY) {
            Stored::Found(stored) => {
                self.items = self.reconcile(stored);
                info!(checked = self.checked_count(), "restored checklist");
                LoadSource::Restored
            }
            Stored::Missing => {
                self.reset();
                LoadSource::Seeded
            }
            Stored::Unreadable(reason) => {
                warn!(%reason, "stored checklist unreadable, using seed");
                self.reset();
                LoadSource::Recovered
            }
        }
    }

    fn reconcile(&self, stored: Vec<ChecklistItem>) -> Vec<ChecklistItem> {
        let stored = index_by_id(stored);
        self.seed
            .iter()
            .cloned()
            .map(|mut item| {
                item.checked = stored.get(&item.id).is_some_and(|saved| saved.checked);
                item
            })
            .collect()
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
