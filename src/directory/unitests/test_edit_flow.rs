use std::time::Duration;

use crate::{
    ContactId,
    EditForm,
    Error,
    Route,
    Submission,
};
use crate::directory::form_state::{FormState, EDIT_NAME_MAX_LEN, PHONE_CONFLICT_MESSAGE};

use super::{Call, HungService, MockService, Op};

#[tokio::test]
async fn test_load_form() {
    let service = MockService::new();
    let id = service.insert("Alice", "Smith", &["111", "222"]);

    let form = EditForm::load(&service, id).await.unwrap();
    assert_eq!(form.id(), id);
    assert_eq!(form.first_name(), "Alice");
    assert_eq!(form.last_name(), "Smith");
    assert_eq!(form.slots().len(), 2);
    assert_eq!(form.slots()[1].key(), "222");
    assert_eq!(form.slots()[1].number(), "222");
    assert!(form.report().is_none());
    assert_eq!(service.calls(), vec![Call::Contact(id)]);
}

#[tokio::test]
async fn test_load_missing_contact() {
    let service = MockService::new();
    let rc = EditForm::load(&service, ContactId::new(77)).await;
    assert!(matches!(rc, Err(Error::State(_))));
}

#[tokio::test]
async fn test_edit_sequence() {
    let service = MockService::new();
    let id = service.insert("Alice", "Smith", &["111", "222"]);

    let mut form = EditForm::load(&service, id).await.unwrap();
    form.set_phone_number(1, "333").unwrap();
    assert!(!form.slots()[0].is_modified());
    assert!(form.slots()[1].is_modified());
    service.clear_calls();

    let submission = form.submit(&service).await.unwrap();
    assert_eq!(service.calls(), vec![
        Call::UpdateContact { id, first_name: "Alice".into(), last_name: "Smith".into() },
        Call::UpdatePhone { id, original: "111".into(), number: "111".into() },
        Call::UpdatePhone { id, original: "222".into(), number: "333".into() },
    ]);

    let Submission::Saved(contact) = &submission else {
        panic!("unexpected submission {:?}", submission);
    };
    assert_eq!(contact.phone_numbers(), vec!["111", "333"]);
    assert_eq!(submission.next_route(), Some(Route::List));
    assert_eq!(service.row(id).unwrap().phone_numbers(), vec!["111", "333"]);

    let report = form.report().unwrap();
    assert!(report.name_updated());
    assert_eq!(report.committed_phones().len(), 2);
    assert_eq!(report.failed_slot(), None);
    assert!(!report.is_partial());

    // Slots now point at the renumbered rows.
    assert_eq!(form.slots()[1].key(), "333");
}

#[tokio::test]
async fn test_rename() {
    let service = MockService::new();
    let id = service.insert("Alice", "Smith", &["111"]);

    let mut form = EditForm::load(&service, id).await.unwrap();
    form.set_first_name("Alicia").set_last_name("Smythe");

    let submission = form.submit(&service).await.unwrap();
    assert!(matches!(submission, Submission::Saved(_)));
    assert_eq!(service.row(id).unwrap().full_name(), "Alicia Smythe");
    assert_eq!(form.state(), FormState::Idle);
}

#[tokio::test]
async fn test_duplicate_phone_stops_sequence() {
    let service = MockService::new();
    service.insert("Other", "Owner", &["999"]);
    let id = service.insert("Alice", "Smith", &["111", "222", "333"]);

    let mut form = EditForm::load(&service, id).await.unwrap();
    form.set_phone_number(0, "100").unwrap();
    form.set_phone_number(1, "999").unwrap();
    form.set_phone_number(2, "300").unwrap();
    service.clear_calls();

    let submission = form.submit(&service).await.unwrap();
    assert!(matches!(submission, Submission::Conflict));
    assert_eq!(submission.next_route(), None);
    assert_eq!(form.message(), Some(PHONE_CONFLICT_MESSAGE));

    // The third slot is never attempted.
    assert_eq!(service.calls(), vec![
        Call::UpdateContact { id, first_name: "Alice".into(), last_name: "Smith".into() },
        Call::UpdatePhone { id, original: "111".into(), number: "100".into() },
        Call::UpdatePhone { id, original: "222".into(), number: "999".into() },
    ]);

    let report = form.report().unwrap();
    assert!(report.is_partial());
    assert!(report.name_updated());
    assert_eq!(report.failed_slot(), Some(1));
    assert_eq!(report.committed_phones().len(), 1);
    assert_eq!(report.committed_phones()[0].key, "111");
    assert_eq!(report.committed_phones()[0].number, "100");
    assert_eq!(service.row(id).unwrap().phone_numbers(), vec!["100", "222", "333"]);

    // Fixing the conflicting slot and resubmitting keys every row by
    // the number it is stored under now.
    form.set_phone_number(1, "200").unwrap();
    service.clear_calls();
    let submission = form.submit(&service).await.unwrap();
    assert!(matches!(submission, Submission::Saved(_)));
    assert_eq!(service.calls()[1..], [
        Call::UpdatePhone { id, original: "100".into(), number: "100".into() },
        Call::UpdatePhone { id, original: "222".into(), number: "200".into() },
        Call::UpdatePhone { id, original: "333".into(), number: "300".into() },
    ]);
    assert_eq!(service.row(id).unwrap().phone_numbers(), vec!["100", "200", "300"]);
    assert_eq!(form.state(), FormState::Idle);
}

#[tokio::test]
async fn test_name_update_failure_skips_phones() {
    let service = MockService::new();
    let id = service.insert("Alice", "Smith", &["111"]);

    let mut form = EditForm::load(&service, id).await.unwrap();
    service.fail_on(Op::UpdateContact, "network unreachable");
    service.clear_calls();

    let submission = form.submit(&service).await.unwrap();
    assert!(matches!(submission, Submission::Failed(_)));
    assert_eq!(service.calls().len(), 1);
    assert_eq!(form.state(), FormState::Idle);
    assert_eq!(form.message(), None);

    let report = form.report().unwrap();
    assert!(!report.name_updated());
    assert!(!report.is_partial());
}

#[tokio::test]
async fn test_phone_failure_is_logged_only() {
    let service = MockService::new();
    let id = service.insert("Alice", "Smith", &["111", "222"]);

    let mut form = EditForm::load(&service, id).await.unwrap();
    service.fail_on(Op::UpdatePhone, "internal error");

    let submission = form.submit(&service).await.unwrap();
    assert!(matches!(submission, Submission::Failed(_)));
    assert_eq!(submission.next_route(), None);
    assert_eq!(form.report().unwrap().failed_slot(), Some(0));
    assert_eq!(form.message(), None);
}

#[tokio::test]
async fn test_deleted_contact_does_not_navigate() {
    let service = MockService::new();
    let id = service.insert("Alice", "Smith", &["111"]);

    let mut form = EditForm::load(&service, id).await.unwrap();
    service.delete_row(id);

    let submission = form.submit(&service).await.unwrap();
    assert!(matches!(submission, Submission::Unchanged));
    assert_eq!(submission.next_route(), None);
    assert!(!form.report().unwrap().name_updated());
    assert!(form.report().unwrap().committed_phones().is_empty());
}

#[tokio::test]
async fn test_bad_slot_index() {
    let service = MockService::new();
    let id = service.insert("Alice", "Smith", &["111"]);

    let mut form = EditForm::load(&service, id).await.unwrap();
    assert!(matches!(form.set_phone_number(1, "222"), Err(Error::Argument(_))));
}

#[tokio::test]
async fn test_long_names_are_rejected() {
    let service = MockService::new();
    let id = service.insert("Alice", "Smith", &["111"]);

    let mut form = EditForm::load(&service, id).await.unwrap();
    service.clear_calls();

    form.set_first_name("Alexandrinaxxxxx");
    assert_eq!(form.first_name().chars().count(), EDIT_NAME_MAX_LEN + 1);
    assert!(matches!(form.submit(&service).await, Err(Error::Argument(_))));

    form.set_first_name("Alice").set_last_name(&"S".repeat(EDIT_NAME_MAX_LEN + 1));
    assert!(matches!(form.submit(&service).await, Err(Error::Argument(_))));

    assert!(service.calls().is_empty());
    assert_eq!(form.state(), FormState::Idle);
    assert!(form.report().is_none());

    // Exactly at the limit, counted in characters.
    form.set_first_name("Éléonore-Claire").set_last_name(&"S".repeat(EDIT_NAME_MAX_LEN));
    assert!(matches!(form.submit(&service).await.unwrap(), Submission::Saved(_)));
    assert_eq!(service.row(id).unwrap().first_name(), "Éléonore-Claire");
}

#[tokio::test]
async fn test_abandoned_submission_blocks_resubmit() {
    let service = MockService::new();
    let id = service.insert("Alice", "Smith", &["111"]);

    let mut form = EditForm::load(&service, id).await.unwrap();
    form.set_first_name("Alicia");
    service.clear_calls();

    let rc = tokio::time::timeout(Duration::from_millis(20), form.submit(&HungService)).await;
    assert!(rc.is_err());
    assert_eq!(form.state(), FormState::Pending);
    assert!(form.report().is_none());

    assert!(matches!(form.submit(&service).await, Err(Error::State(_))));
    assert!(service.calls().is_empty());
    assert!(form.report().is_none());

    form.reset();
    assert_eq!(form.state(), FormState::Idle);
    assert!(matches!(form.submit(&service).await.unwrap(), Submission::Saved(_)));
    assert!(form.report().unwrap().name_updated());
    assert_eq!(service.row(id).unwrap().first_name(), "Alicia");
}
