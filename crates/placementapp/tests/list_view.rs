use chrono::NaiveDate;
use placementapp::fields::{FieldPatch, FieldValue, FormValues};
use placementapp::notify::{RecordingNotifier, Severity};
use placementapp::records::{Application, ApplicationStatus, Report};
use placementapp::review::ReviewStatus;
use placementapp::session::{Role, Session};
use placementapp::store::{MockDataSource, RecordStore};
use placementapp::view::{derive_view, FilterState, PageRequest, SortState};
use placementapp::{ListController, PlacementError};
use std::rc::Rc;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn application(id: u64, name: &str, applied: &str, status: ApplicationStatus) -> Application {
    Application {
        id,
        student_name: name.to_string(),
        job_title: "Software Intern".to_string(),
        company: "Instabug".to_string(),
        post_id: 1,
        applied_date: date(applied),
        status,
        skills: vec![],
    }
}

fn three_applications() -> Vec<Application> {
    vec![
        application(1, "Ahmed Hassan", "2025-05-10", ApplicationStatus::Pending),
        application(2, "Sara Mohamed", "2025-05-09", ApplicationStatus::Finalized),
        application(3, "Omar Khaled", "2025-05-08", ApplicationStatus::Accepted),
    ]
}

fn setup() -> (
    ListController<Application, MockDataSource<Application>>,
    Rc<RecordingNotifier>,
) {
    let notifier = Rc::new(RecordingNotifier::new());
    let source = MockDataSource::new(three_applications());
    let mut controller = ListController::new(
        Session::new("Office", Role::ScadOffice),
        Rc::clone(&notifier),
        source,
    );
    controller.load().unwrap();
    (controller, notifier)
}

fn ids(rows: &[&Application]) -> Vec<u64> {
    rows.iter().map(|a| a.id).collect()
}

fn dates(rows: &[&Application]) -> Vec<String> {
    rows.iter().map(|a| a.applied_date.to_string()).collect()
}

#[test]
fn test_status_filter_selects_only_pending() {
    let (mut controller, _) = setup();
    controller.set_filter("status", "Pending");
    assert_eq!(ids(&controller.view()), vec![1]);

    controller.set_filter("status", "all");
    assert_eq!(ids(&controller.view()), vec![1, 2, 3]);
}

#[test]
fn test_date_sort_descending_then_toggle_ascending() {
    let (mut controller, _) = setup();
    controller.set_sort(Some(SortState::descending("appliedDate")));
    assert_eq!(
        dates(&controller.view()),
        vec!["2025-05-10", "2025-05-09", "2025-05-08"]
    );

    controller.toggle_sort("appliedDate");
    assert_eq!(
        dates(&controller.view()),
        vec!["2025-05-08", "2025-05-09", "2025-05-10"]
    );
}

#[test]
fn test_create_with_empty_job_title_changes_nothing() {
    let (mut controller, notifier) = setup();
    let before = controller.store().records().to_vec();

    controller.open_create();
    let form: FormValues = [
        ("studentName", "Nour Ibrahim"),
        ("jobTitle", ""),
        ("company", "Valeo"),
        ("postId", "3"),
        ("appliedDate", "2025-05-11"),
        ("status", "Pending"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let err = controller.submit(form).unwrap_err();
    let PlacementError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errors.missing_fields(), vec!["jobTitle"]);
    assert_eq!(controller.store().len(), before.len());
    assert_eq!(controller.store().records(), before.as_slice());
    assert_eq!(controller.source().snapshot(), before);
    assert!(notifier.notices().is_empty());
}

#[test]
fn test_search_is_case_insensitive() {
    let (mut controller, _) = setup();
    controller.set_search("ahmed");
    assert_eq!(ids(&controller.view()), vec![1]);

    controller.set_search("MOHAMED");
    assert_eq!(ids(&controller.view()), vec![2]);
}

#[test]
fn test_identity_filter_and_idempotent_sort() {
    let records = three_applications();
    let identity = FilterState::new()
        .with_filter("status", "all")
        .with_filter("company", "all");
    assert_eq!(derive_view(&records, &identity, None).len(), records.len());

    for key in ["appliedDate", "studentName", "status", "id"] {
        let sort = SortState::ascending(key);
        let once: Vec<Application> = derive_view(&records, &identity, Some(&sort))
            .into_iter()
            .cloned()
            .collect();
        let twice = derive_view(&once, &identity, Some(&sort));
        let once_ids: Vec<u64> = once.iter().map(|a| a.id).collect();
        assert_eq!(ids(&twice), once_ids, "sorting by {key}");
    }
}

#[test]
fn test_upsert_then_remove_round_trip() {
    let mut store = RecordStore::new();
    store.seed(three_applications());
    let before = store.records().to_vec();

    store.upsert(application(7, "Laila Samy", "2025-05-12", ApplicationStatus::Pending));
    store.remove(7);
    assert_eq!(store.records(), before.as_slice());
}

#[test]
fn test_flagging_requires_reason_in_one_patch() {
    let notifier = Rc::new(RecordingNotifier::new());
    let mut controller = ListController::new(
        Session::default(),
        Rc::clone(&notifier),
        MockDataSource::new(placementapp::records::demo::reports()),
    );
    controller.load().unwrap();

    let mut patch = FieldPatch::new();
    patch.insert("status".into(), Some(FieldValue::Enum("Flagged".into())));
    assert!(controller.patch(1, &patch).is_err());
    assert_eq!(controller.store().get(1).unwrap().status, ReviewStatus::Pending);

    patch.insert("reason".into(), Some(FieldValue::text("x")));
    let report: &Report = controller.patch(1, &patch).unwrap();
    assert_eq!(report.status, ReviewStatus::Flagged);
    assert_eq!(report.reason.as_deref(), Some("x"));
    assert_eq!(notifier.last().unwrap().severity, Severity::Success);
}

#[test]
fn test_patch_of_missing_record_resets_modal() {
    let (mut controller, notifier) = setup();
    controller.open_edit(2).unwrap();

    let err = controller.patch(99, &FieldPatch::new()).unwrap_err();
    assert!(matches!(err, PlacementError::NotFound(99)));
    assert!(!controller.modal().is_open());
    assert_eq!(notifier.last().unwrap().severity, Severity::Error);
}

#[test]
fn test_pagination_is_a_final_slice() {
    let (mut controller, _) = setup();
    controller.set_sort(Some(SortState::ascending("studentName")));
    let full = ids(&controller.view());

    let first = controller.page(PageRequest::new(1, 2));
    let second = controller.page(PageRequest::new(2, 2));
    let mut paged = ids(&first.rows);
    paged.extend(ids(&second.rows));
    assert_eq!(paged, full);
    assert_eq!(first.page_count, 2);
    assert_eq!(first.total, 3);
}

#[test]
fn test_edit_then_filter_sees_new_snapshot() {
    let (mut controller, _) = setup();
    controller.set_filter("status", "Accepted");
    assert_eq!(ids(&controller.view()), vec![3]);

    controller.open_edit(1).unwrap();
    controller.set_draft("status", "accepted");
    controller.submit(FormValues::new()).unwrap();

    assert_eq!(ids(&controller.view()), vec![1, 3]);
}
