//! Emergency contact slots, one per seeded role.

use tracing::{debug, info, warn};

use crate::{
    domain::{ContactField, EmergencyContact},
    errors::{PlannerError, Result},
    storage::{load_json, save_json, KeyValueStore, Stored, CONTACTS_KEY},
};

use super::{index_by_id, LoadSource};

/// Owns the emergency contacts. Roles and the decision-maker flag come from
/// the seed; only names and phone numbers are editable.
#[derive(Debug, Clone)]
pub struct ContactManager {
    seed: Vec<EmergencyContact>,
    contacts: Vec<EmergencyContact>,
}

impl ContactManager {
    pub fn new(seed: Vec<EmergencyContact>) -> Self {
        Self {
            contacts: seed.clone(),
            seed,
        }
    }

    pub fn contacts(&self) -> &[EmergencyContact] {
        &self.contacts
    }

    pub fn update_contact(
        &mut self,
        index: usize,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<()> {
        let len = self.contacts.len();
        let contact = self
            .contacts
            .get_mut(index)
            .ok_or(PlannerError::ContactIndexOutOfRange { index, len })?;
        contact.set_field(field, value);
        debug!(index, role = %contact.role, %field, "updated contact");
        Ok(())
    }

    pub fn decision_maker(&self) -> Option<&EmergencyContact> {
        self.contacts.iter().find(|contact| contact.is_decision_maker)
    }

    /// Number of contacts with both a name and a phone number.
    pub fn completed_count(&self) -> usize {
        self.contacts
            .iter()
            .filter(|contact| contact.is_complete())
            .count()
    }

    pub fn reset(&mut self) {
        self.contacts = self.seed.clone();
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        save_json(store, CONTACTS_KEY, &self.contacts)?;
        info!(completed = self.completed_count(), "saved contacts");
        Ok(())
    }

    /// Restores names and phone numbers by role, falling back to the seed.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> LoadSource {
        match load_json::<Vec<EmergencyContact>>(store, CONTACTS_KEY) {
            Stored::Found(stored) => {
                self.contacts = self.reconcile(stored);
                info!(completed = self.completed_count(), "restored contacts");
                LoadSource::Restored
            }
            Stored::Missing => {
                self.reset();
                LoadSource::Seeded
            }
            Stored::Unreadable(reason) => {
                warn!(%reason, "stored contacts unreadable, using seed");
                self.reset();
                LoadSource::Recovered
            }
        }
    }

    fn reconcile(&self, stored: Vec<EmergencyContact>) -> Vec<EmergencyContact> {
        let mut by_role = index_by_id(stored);
        self.seed
            .iter()
            .cloned()
            .map(|mut contact| {
                if let Some(saved) = by_role.remove(&contact.role) {
                    contact.name = saved.name;
                    contact.phone = saved.phone;
                }
                contact
            })
            .collect()
    }
}
