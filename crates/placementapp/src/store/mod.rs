//! # Record Store
//!
//! The authoritative, ordered, in-memory collection behind one list page.
//!
//! Every mutation replaces whole records: `patch` builds a merged copy, runs
//! the family's [`Record::check_update`] guard against it and only then swaps
//! it in. A failed mutation leaves the store exactly as it was.
//!
//! ## Missing ids
//!
//! - [`RecordStore::remove`] is lenient: an absent id is a no-op.
//! - [`RecordStore::patch`] is strict: an absent id is [`PlacementError::NotFound`].
//!
//! ## Change detection
//!
//! [`RecordStore::revision`] increases on every successful mutation, so a
//! dependent can tell that it is looking at a new snapshot.
//!
//! ## Data Sources
//!
//! Where records come from and where saves go lives behind
//! [`DataSource`](source::DataSource):
//!
//! - [`mock::MockDataSource`]: in-memory, with simulated latency and failures.
//! - [`json::JsonFileSource`]: one JSON document keyed by family name.

use crate::error::{FieldIssue, PlacementError, Result, ValidationErrors};
use crate::fields::FieldPatch;
use crate::record::{Record, RecordId, MAX_RECORD_ID};
use tracing::debug;

pub mod json;
pub mod mock;
pub mod source;

pub use json::JsonFileSource;
pub use mock::MockDataSource;
pub use source::DataSource;

#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    records: Vec<R>,
    revision: u64,
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            revision: 0,
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection.
    pub fn seed(&mut self, initial: Vec<R>) {
        debug!(family = R::config().family, count = initial.len(), "seeding store");
        self.records = initial;
        self.bump();
    }

    /// Insert `record`, or replace the record with the same id in place.
    pub fn upsert(&mut self, record: R) {
        match self.position(record.id()) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
        self.bump();
    }

    /// Append `record` under the next free id and return that id.
    pub fn insert_new(&mut self, mut record: R) -> Result<RecordId> {
        let id = self.next_id()?;
        record.set_id(id);
        self.records.push(record);
        self.bump();
        Ok(id)
    }

    /// Delete the record with `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: RecordId) -> Option<R> {
        let index = self.position(id)?;
        let removed = self.records.remove(index);
        self.bump();
        Some(removed)
    }

    /// Merge `fields` into the record with `id`.
    ///
    /// Nothing is written unless every field applies and the family's update
    /// guard accepts the result.
    pub fn patch(&mut self, id: RecordId, fields: &FieldPatch) -> Result<&R> {
        let index = self.position(id).ok_or(PlacementError::NotFound(id))?;
        let next = merge_fields(&self.records[index], fields)?;
        self.records[index] = next;
        self.bump();
        Ok(&self.records[index])
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.position(id).is_some()
    }

    /// Records in store order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// One past the highest id in use, starting at 1.
    ///
    /// Fails once the highest id in use is [`MAX_RECORD_ID`].
    pub fn next_id(&self) -> Result<RecordId> {
        match self.records.iter().map(Record::id).max() {
            None => Ok(1),
            Some(max) if max < MAX_RECORD_ID => Ok(max + 1),
            Some(_) => Err(PlacementError::IdsExhausted(R::config().family)),
        }
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

/// Build the record that `fields` would turn `current` into.
///
/// Every field that cannot be applied is reported, followed by the family's
/// update guard. `current` is never touched.
pub fn merge_fields<R: Record>(
    current: &R,
    fields: &FieldPatch,
) -> std::result::Result<R, ValidationErrors> {
    let mut next = current.clone();
    let mut errors = ValidationErrors::new();

    for (name, value) in fields {
        if name == "id" {
            errors.push(FieldIssue::invalid("id", "identity cannot change"));
            continue;
        }
        if next.set_field(name, value.clone()).is_none() {
            let reason = match R::config().field(name) {
                Some(spec) if value.is_none() && spec.required => "cannot be cleared",
                Some(_) => "wrong type for this field",
                None => "unknown field",
            };
            errors.push(FieldIssue::invalid(name.as_str(), reason));
        }
    }
    errors.into_result()?;

    current.check_update(&next)?;
    Ok(next)
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::RecordStore;
    use crate::records::{demo, Application, Report};

    /// A store seeded with the demo applications.
    pub fn application_store() -> RecordStore<Application> {
        let mut store = RecordStore::new();
        store.seed(demo::applications());
        store
    }

    /// A store seeded with the demo reports.
    pub fn report_store() -> RecordStore<Report> {
        let mut store = RecordStore::new();
        store.seed(demo::reports());
        store
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{application_store, report_store};
    use super::*;
    use crate::fields::FieldValue;
    use crate::records::{Application, ApplicationStatus};
    use crate::review::ReviewStatus;

    fn patch_of(pairs: &[(&str, Option<FieldValue>)]) -> FieldPatch {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = application_store();
        let order_before: Vec<_> = store.records().iter().map(|a| a.id).collect();

        let mut changed = store.get(2).unwrap().clone();
        changed.company = "Orange".into();
        store.upsert(changed);

        let order_after: Vec<_> = store.records().iter().map(|a| a.id).collect();
        assert_eq!(order_before, order_after);
        assert_eq!(store.get(2).unwrap().company, "Orange");
    }

    #[test]
    fn upsert_then_remove_round_trips() {
        let mut store = application_store();
        let before = store.records().to_vec();

        let mut extra = Application::template();
        extra.id = 99;
        extra.student_name = "Sara Mohamed".into();
        store.upsert(extra);
        assert_eq!(store.len(), before.len() + 1);

        store.remove(99);
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn remove_of_missing_id_is_a_no_op() {
        let mut store = application_store();
        let revision = store.revision();
        assert!(store.remove(404).is_none());
        assert_eq!(store.len(), 4);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn insert_new_assigns_next_id() {
        let mut store = application_store();
        let id = store.insert_new(Application::template()).unwrap();
        assert_eq!(id, 5);
        assert_eq!(store.get(5).unwrap().id, 5);

        let mut empty: RecordStore<Application> = RecordStore::new();
        assert_eq!(empty.insert_new(Application::template()).unwrap(), 1);
    }

    #[test]
    fn insert_new_after_the_highest_id_fails() {
        let mut store = application_store();
        let mut last = Application::template();
        last.id = MAX_RECORD_ID;
        store.upsert(last);
        let revision = store.revision();

        let result = store.insert_new(Application::template());
        assert!(matches!(
            result,
            Err(PlacementError::IdsExhausted("applications"))
        ));
        assert_eq!(store.len(), 5);
        assert_eq!(store.revision(), revision);

        let mut beyond = Application::template();
        beyond.id = u64::MAX;
        store.upsert(beyond);
        assert!(store.next_id().is_err());
    }

    #[test]
    fn patch_of_missing_id_is_not_found() {
        let mut store = application_store();
        let result = store.patch(404, &FieldPatch::new());
        assert!(matches!(result, Err(PlacementError::NotFound(404))));
    }

    #[test]
    fn patch_merges_fields() {
        let mut store = application_store();
        let patched = store
            .patch(
                1,
                &patch_of(&[("status", Some(FieldValue::Enum("Accepted".into())))]),
            )
            .unwrap();
        assert_eq!(patched.status, ApplicationStatus::Accepted);
        assert_eq!(patched.student_name, "Ahmed Hassan");
    }

    #[test]
    fn failed_patch_writes_nothing() {
        let mut store = application_store();
        let before = store.records().to_vec();
        let revision = store.revision();

        let result = store.patch(
            1,
            &patch_of(&[
                ("company", Some(FieldValue::text("Orange"))),
                ("postId", Some(FieldValue::text("not a number"))),
                ("nickname", Some(FieldValue::text("x"))),
            ]),
        );

        let Err(PlacementError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(errors.invalid_fields(), vec!["nickname", "postId"]);
        assert_eq!(store.records(), before.as_slice());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn flagging_without_reason_is_rejected() {
        let mut store = report_store();
        let result = store.patch(
            1,
            &patch_of(&[("status", Some(FieldValue::Enum("Flagged".into())))]),
        );
        assert!(matches!(result, Err(PlacementError::Validation(_))));
        assert_eq!(store.get(1).unwrap().status, ReviewStatus::Pending);
    }

    #[test]
    fn flagging_with_reason_writes_both_fields() {
        let mut store = report_store();
        let report = store
            .patch(
                1,
                &patch_of(&[
                    ("status", Some(FieldValue::Enum("Flagged".into()))),
                    ("reason", Some(FieldValue::text("x"))),
                ]),
            )
            .unwrap();
        assert_eq!(report.status, ReviewStatus::Flagged);
        assert_eq!(report.reason.as_deref(), Some("x"));
    }

    #[test]
    fn accepting_without_clearing_the_reason_is_rejected() {
        let mut store = report_store();
        let before = store.records().to_vec();

        let result = store.patch(
            3,
            &patch_of(&[("status", Some(FieldValue::Enum("Accepted".into())))]),
        );
        let Err(PlacementError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(errors.invalid_fields(), vec!["reason"]);
        assert_eq!(store.records(), before.as_slice());

        let report = store
            .patch(
                3,
                &patch_of(&[
                    ("status", Some(FieldValue::Enum("Accepted".into()))),
                    ("reason", None),
                ]),
            )
            .unwrap();
        assert_eq!(report.status, ReviewStatus::Accepted);
        assert_eq!(report.reason, None);
    }

    #[test]
    fn reason_on_pending_report_is_rejected() {
        let mut store = report_store();
        let result = store.patch(1, &patch_of(&[("reason", Some(FieldValue::text("stray")))]));
        assert!(matches!(result, Err(PlacementError::Validation(_))));
        assert_eq!(store.get(1).unwrap().reason, None);
    }

    #[test]
    fn identity_cannot_be_patched() {
        let mut store = application_store();
        let result = store.patch(1, &patch_of(&[("id", Some(FieldValue::Int(7)))]));
        assert!(result.is_err());
        assert!(store.contains(1));
    }

    #[test]
    fn seed_replaces_everything() {
        let mut store = application_store();
        store.seed(vec![]);
        assert!(store.is_empty());
    }
}
