//! Filesystem-backed key-value store: one JSON document per key.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Duration, NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::{
    errors::{PlannerError, Result},
    utils::fs::replace_file,
};

use super::KeyValueStore;

const VALUE_EXTENSION: &str = "json";
const BACKUP_DIR: &str = "backups";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const DEFAULT_RETENTION: usize = 5;

/// A backup copy of a stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub key: String,
    pub name: String,
    pub path: PathBuf,
}

/// Writes each key to `<root>/<key>.json` atomically. Overwritten values are
/// first copied to `<root>/backups/<key>/`, keeping the newest `retention` copies.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        Self::with_retention(root, DEFAULT_RETENTION)
    }

    pub fn with_retention(root: PathBuf, retention: usize) -> Result<Self> {
        fs::create_dir_all(&root)?;
        let backups_dir = root.join(BACKUP_DIR);
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            root,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the value of `key`. Keys are limited to ASCII letters,
    /// digits and `-`, so distinct keys never share a file.
    pub fn value_path(&self, key: &str) -> Result<PathBuf> {
        let key = checked_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, VALUE_EXTENSION)))
    }

    fn backup_dir(&self, key: &str) -> Result<PathBuf> {
        Ok(self.backups_dir.join(checked_key(key)?))
    }

    /// Lists backups for `key`, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>> {
        let dir = self.backup_dir(key)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            let name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            entries.push(BackupInfo {
                key: key.to_string(),
                name,
                path,
            });
        }
        entries.sort_by(|a, b| {
            parse_backup_stamp(&b.name)
                .cmp(&parse_backup_stamp(&a.name))
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(entries)
    }

    /// Replaces the current value of `key` with the named backup and returns it.
    pub fn restore_backup(&self, key: &str, backup_name: &str) -> Result<String> {
        let backup_path = self.backup_dir(key)?.join(backup_name);
        if backup_name.contains(['/', '\\']) || !backup_path.is_file() {
            return Err(PlannerError::StorageError(format!(
                "backup `{}` not found for `{}`",
                backup_name, key
            )));
        }
        let data = fs::read_to_string(&backup_path)?;
        replace_file(&self.value_path(key)?, &data)?;
        debug!(key, backup = backup_name, "restored stored value from backup");
        Ok(data)
    }

    fn backup_existing(&self, key: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(key)?;
        fs::create_dir_all(&dir)?;
        let stem = format!("{}_{}", key, Utc::now().format(BACKUP_TIMESTAMP_FORMAT));
        let mut backup_path = dir.join(format!("{}.{}", stem, VALUE_EXTENSION));
        let mut counter = 1;
        while backup_path.exists() {
            backup_path = dir.join(format!("{}_{}.{}", stem, counter, VALUE_EXTENSION));
            counter += 1;
        }
        fs::copy(path, &backup_path)?;
        self.prune_backups(key)
    }

    fn prune_backups(&self, key: &str) -> Result<()> {
        let entries = self.list_backups(key)?;
        for entry in entries.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&entry.path) {
                warn!(path = %entry.path.display(), %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        self.backup_existing(key, &path)?;
        replace_file(&path, value)?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        if path.exists() {
            self.backup_existing(key, &path)?;
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn checked_key(key: &str) -> Result<&str> {
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Ok(key)
    } else {
        Err(PlannerError::InvalidInput(format!(
            "storage key `{}` may only contain ASCII letters, digits and `-`",
            key
        )))
    }
}

/// Orders backup names `<key>_<YYYYMMDD>_<HHMMSS>_<mmm>[_<n>].json` by
/// timestamp, then by collision counter.
fn parse_backup_stamp(name: &str) -> Option<(NaiveDateTime, u32)> {
    let stem = name.strip_suffix(".json")?;
    let parts: Vec<&str> = stem.split('_').collect();
    let (date, time, millis, counter) = match parts.as_slice() {
        [_, date, time, millis] => (*date, *time, *millis, 0),
        [_, date, time, millis, counter] => (*date, *time, *millis, counter.parse().ok()?),
        _ => return None,
    };
    if !is_digits(date, 8) || !is_digits(time, 6) || !is_digits(millis, 3) {
        return None;
    }
    let at = NaiveDateTime::parse_from_str(&format!("{}{}", date, time), "%Y%m%d%H%M%S").ok()?;
    Some((at + Duration::milliseconds(millis.parse().ok()?), counter))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir(retention: usize) -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::with_retention(temp.path().join("store"), retention)
            .expect("json file store");
        (store, temp)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (store, _guard) = store_with_temp_dir(3);
        assert_eq!(store.get_item("birthPrepChecklist").unwrap(), None);
    }

    #[test]
    fn set_and_get_roundtrip() {
        let (store, _guard) = store_with_temp_dir(3);
        store.set_item("birthPrepContacts", "[]").unwrap();
        assert_eq!(
            store.get_item("birthPrepContacts").unwrap().as_deref(),
            Some("[]")
        );
        assert!(store
            .value_path("birthPrepContacts")
            .unwrap()
            .ends_with("birthPrepContacts.json"));
    }

    #[test]
    fn overwrite_keeps_bounded_backups() {
        let (store, _guard) = store_with_temp_dir(2);
        for value in ["1", "2", "3", "4"] {
            store.set_item("k", value).unwrap();
        }
        let backups = store.list_backups("k").unwrap();
        assert_eq!(backups.len(), 2);
        let newest = fs::read_to_string(&backups[0].path).unwrap();
        assert_eq!(newest, "3");
    }

    #[test]
    fn restore_replaces_current_value() {
        let (store, _guard) = store_with_temp_dir(5);
        store.set_item("k", "first").unwrap();
        store.set_item("k", "second").unwrap();
        let backup = store.list_backups("k").unwrap().remove(0);
        let restored = store.restore_backup("k", &backup.name).unwrap();
        assert_eq!(restored, "first");
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn restore_rejects_unknown_or_escaping_names() {
        let (store, _guard) = store_with_temp_dir(5);
        store.set_item("k", "v").unwrap();
        assert!(store.restore_backup("k", "nope.json").is_err());
        assert!(store.restore_backup("k", "../k.json").is_err());
    }

    #[test]
    fn keys_outside_the_file_name_alphabet_are_rejected() {
        let (store, _guard) = store_with_temp_dir(1);
        for key in ["../escape", "a.b", "a_b", "", "with space"] {
            assert!(
                matches!(store.set_item(key, "v"), Err(PlannerError::InvalidInput(_))),
                "{key:?} was accepted"
            );
            assert!(store.get_item(key).is_err());
            assert!(store.value_path(key).is_err());
        }
        store.set_item("a-b", "dash").unwrap();
        assert_eq!(store.get_item("a-b").unwrap().as_deref(), Some("dash"));
        assert_eq!(fs::read_dir(store.root()).unwrap().count(), 2);
    }

    #[test]
    fn backups_order_collision_counters_numerically() {
        let (store, _guard) = store_with_temp_dir(3);
        store.set_item("k", "current").unwrap();
        let dir = store.root().join(BACKUP_DIR).join("k");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("k_20250101_120000_000.json"), "0").unwrap();
        for counter in 1..=11 {
            let name = format!("k_20250101_120000_000_{}.json", counter);
            fs::write(dir.join(name), counter.to_string()).unwrap();
        }

        let names: Vec<String> = store
            .list_backups("k")
            .unwrap()
            .into_iter()
            .map(|backup| backup.name)
            .collect();
        assert_eq!(names[0], "k_20250101_120000_000_11.json");
        assert_eq!(names[1], "k_20250101_120000_000_10.json");
        assert_eq!(names[2], "k_20250101_120000_000_9.json");
        assert_eq!(names[11], "k_20250101_120000_000.json");

        store.set_item("k", "next").unwrap();
        let kept: Vec<String> = store
            .list_backups("k")
            .unwrap()
            .into_iter()
            .map(|backup| fs::read_to_string(backup.path).unwrap())
            .collect();
        assert_eq!(kept, vec!["current", "11", "10"]);
    }
}
