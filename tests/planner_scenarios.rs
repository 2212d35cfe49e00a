mod common;

use birth_prep_core::{
    config::PlannerSeed,
    core::{LoadSource, NotificationKind},
    domain::{ContactField, ExpenseCategory},
    PlannerError,
};
use chrono::Duration;
use common::{setup_test_env, today};

const EXPENSES: [(ExpenseCategory, &str); 5] = [
    (ExpenseCategory::Transport, "100"),
    (ExpenseCategory::Facility, "200"),
    (ExpenseCategory::Supplies, "50"),
    (ExpenseCategory::Emergency, "150"),
    (ExpenseCategory::Postpartum, "100"),
];

#[test]
fn load_without_prior_save_matches_seed() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    let report = planner.load().expect("first load runs");

    assert_eq!(report.checklist, LoadSource::Seeded);
    assert_eq!(report.contacts, LoadSource::Seeded);
    assert_eq!(report.financial_plan, LoadSource::Seeded);
    let seed = PlannerSeed::standard();
    assert_eq!(planner.checklist().items(), seed.checklist.as_slice());
    assert_eq!(planner.contacts().contacts(), seed.contacts.as_slice());
    assert_eq!(planner.checklist().progress(), 0.0);
    assert!(env.notifier.messages().is_empty());
}

#[test]
fn second_load_is_a_no_op() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    planner.load();
    planner.toggle_item("transport-primary").unwrap();

    assert!(planner.load().is_none());
    assert!(planner.checklist().item("transport-primary").unwrap().checked);

    planner.reload();
    assert!(!planner.checklist().item("transport-primary").unwrap().checked);
}

#[test]
fn checking_three_items_reaches_twenty_percent() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    planner.load();
    for id in ["facility-research", "items-baby", "support-companion"] {
        assert!(planner.toggle_item(id).unwrap());
    }
    let summary = planner.summary();
    assert_eq!(summary.checked_items, 3);
    assert_eq!(summary.total_items, 15);
    assert_eq!(summary.checklist_progress, 20.0);
}

#[test]
fn expenses_over_ten_days_need_sixty_a_day() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    planner.load();
    for (category, amount) in EXPENSES {
        planner.update_expense(category, amount);
    }
    let due = today() + Duration::days(10);
    planner.set_due_date(&due.format("%Y-%m-%d").to_string());

    let summary = planner.summary();
    assert_eq!(summary.total_expenses, 600.0);
    assert_eq!(summary.remaining_days, 10);
    assert_eq!(summary.daily_savings_target, 60.0);
}

#[test]
fn contact_update_changes_only_its_index() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    planner.load();
    let before = planner.contacts().contacts().to_vec();

    planner.update_contact_field(4, "name", "Jane Doe").unwrap();

    let after = planner.contacts().contacts();
    assert_eq!(after[4].name, "Jane Doe");
    assert_eq!(&after[..4], &before[..4]);
    assert_eq!(planner.summary().decision_maker.as_deref(), Some("Jane Doe"));
    assert_eq!(
        env.messages_of(NotificationKind::Success),
        vec!["Contact updated successfully".to_string()]
    );
}

#[test]
fn bad_updates_are_reported_not_applied() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    planner.load();

    let err = planner
        .update_contact(9, ContactField::Phone, "555")
        .unwrap_err();
    assert!(matches!(err, PlannerError::ContactIndexOutOfRange { index: 9, .. }));
    assert!(matches!(
        planner.toggle_item("no-such-item"),
        Err(PlannerError::ItemNotFound(_))
    ));
    assert!(matches!(
        planner.update_contact_field(0, "email", "a@b.c"),
        Err(PlannerError::InvalidInput(_))
    ));

    assert_eq!(env.messages_of(NotificationKind::Error).len(), 3);
    assert_eq!(planner.contacts().contacts(), PlannerSeed::standard().contacts.as_slice());
    assert_eq!(planner.checklist().checked_count(), 0);
}

#[test]
fn saved_state_survives_a_new_planner() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    planner.load();
    planner.toggle_item("communication-phone").unwrap();
    planner
        .update_contact(2, ContactField::Phone, "0800 123 456")
        .unwrap();
    planner.set_due_date("2025-06-01");
    planner.set_target_saving("900");
    planner.set_current_saving("300");
    for (category, amount) in EXPENSES {
        planner.update_expense(category, amount);
    }
    planner.save_all().unwrap();

    let mut restored = env.planner(today());
    let report = restored.load().unwrap();
    assert_eq!(report.checklist, LoadSource::Restored);
    assert_eq!(report.contacts, LoadSource::Restored);
    assert_eq!(report.financial_plan, LoadSource::Restored);
    assert_eq!(restored.checklist().items(), planner.checklist().items());
    assert_eq!(restored.contacts().contacts(), planner.contacts().contacts());
    assert_eq!(restored.finance().plan(), planner.finance().plan());
    assert_eq!(restored.summary(), planner.summary());

    assert_eq!(
        env.messages_of(NotificationKind::Success),
        vec![
            "Contact updated successfully".to_string(),
            "Checklist progress saved".to_string(),
            "Emergency contacts saved".to_string(),
            "Financial plan saved".to_string(),
        ]
    );
}

#[test]
fn unsaved_changes_are_not_persisted() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    planner.load();
    planner.toggle_item("items-mother").unwrap();
    planner.save_contacts().unwrap();

    let mut restored = env.planner(today());
    restored.load();
    assert_eq!(restored.checklist().checked_count(), 0);
}

#[test]
fn reset_returns_to_seed_until_saved() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    planner.load();
    planner.toggle_item("facility-visit").unwrap();
    planner.set_target_saving("400");
    planner.save_all().unwrap();

    planner.reset();
    assert_eq!(planner.checklist().checked_count(), 0);
    assert_eq!(planner.finance().plan().target_saving, 0.0);
    assert!(env
        .messages_of(NotificationKind::Info)
        .contains(&"Birth plan reset to defaults".to_string()));

    let mut other = env.planner(today());
    other.load();
    assert_eq!(other.checklist().checked_count(), 1);

    planner.save_all().unwrap();
    other.reload();
    assert_eq!(other.checklist().checked_count(), 0);
}

#[test]
fn full_plan_is_ready() {
    let env = setup_test_env();
    let mut planner = env.planner(today());
    planner.load();
    let ids: Vec<String> = planner
        .checklist()
        .items()
        .iter()
        .map(|item| item.id.clone())
        .collect();
    for id in ids {
        planner.toggle_item(&id).unwrap();
    }
    for index in 0..planner.contacts().contacts().len() {
        planner
            .update_contact(index, ContactField::Name, format!("Person {index}").as_str())
            .unwrap();
        planner
            .update_contact(index, ContactField::Phone, "0200 000 000")
            .unwrap();
    }
    let summary = planner.summary();
    assert_eq!(summary.checklist_progress, 100.0);
    assert!(summary
        .category_progress
        .iter()
        .all(|(_, progress)| *progress == 100.0));
    assert!(summary.is_ready());
}
