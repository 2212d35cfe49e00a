#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use birth_prep_core::{
    config::PlannerSeed,
    core::{BirthPrepPlanner, FixedClock, NotificationKind, RecordingNotifier},
    storage::JsonFileStore,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub struct TestEnv {
    pub root: PathBuf,
    pub store: JsonFileStore,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestEnv {
    /// Fresh planner over this environment's store, pinned to `today`.
    pub fn planner(&self, today: NaiveDate) -> BirthPrepPlanner {
        BirthPrepPlanner::new(
            PlannerSeed::standard(),
            Box::new(self.store.clone()),
            Box::new(Arc::clone(&self.notifier)),
            Box::new(FixedClock::at_date(today)),
        )
    }

    pub fn messages_of(&self, kind: NotificationKind) -> Vec<String> {
        self.notifier
            .messages()
            .into_iter()
            .filter(|(_, k)| *k == kind)
            .map(|(message, _)| message)
            .collect()
    }
}

/// Creates an isolated JSON store backed by a unique directory for each test.
pub fn setup_test_env() -> TestEnv {
    let temp = TempDir::new().expect("create temp dir");
    let root = temp.path().join("store");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store = JsonFileStore::with_retention(root.clone(), 3).expect("create json store");
    TestEnv {
        root,
        store,
        notifier: Arc::new(RecordingNotifier::new()),
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}
