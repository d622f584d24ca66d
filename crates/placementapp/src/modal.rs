//! # Detail/Mutation Modal
//!
//! The single-record create/edit surface of a list page.
//!
//! Opening the modal copies the record into a draft of form strings, so
//! nothing typed into the form reaches the store before an explicit submit.
//! Submitting validates the whole draft against the family's
//! [`ListConfig`](crate::fields::ListConfig) and reports every problem at
//! once. Only a fully valid draft is written, through
//! [`RecordStore::insert_new`] in create mode or [`RecordStore::patch`] in
//! edit mode.
//!
//! Fields marked read-only (`id`, a report's review status and reason) are
//! not part of the draft. Review changes go through [`crate::review`].

use crate::error::{FieldIssue, PlacementError, Result, ValidationErrors};
use crate::fields::{FieldPatch, FormValues};
use crate::record::{Record, RecordId};
use crate::store::{merge_fields, RecordStore};
use std::marker::PhantomData;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(RecordId),
}

/// A validated submission that has not been written yet.
#[derive(Debug, Clone)]
pub struct Prepared<R> {
    pub mode: ModalMode,
    /// The record as it will be stored. In create mode it carries the id it
    /// will be inserted under.
    pub record: R,
    /// Every editable field, typed
    pub patch: FieldPatch,
}

#[derive(Debug)]
pub struct DetailModal<R: Record> {
    mode: Option<ModalMode>,
    draft: FormValues,
    _record: PhantomData<R>,
}

impl<R: Record> Default for DetailModal<R> {
    fn default() -> Self {
        Self {
            mode: None,
            draft: FormValues::new(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> DetailModal<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the form: `None` for a new record, `Some` to edit a copy of one.
    pub fn open(&mut self, record: Option<&R>) {
        let (mode, source) = match record {
            Some(record) => (ModalMode::Edit(record.id()), record.clone()),
            None => (ModalMode::Create, R::template()),
        };
        self.draft = form_values(&source);
        self.mode = Some(mode);
        debug!(family = R::config().family, ?mode, "modal opened");
    }

    pub fn close(&mut self) {
        self.mode = None;
        self.draft.clear();
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn mode(&self) -> Option<ModalMode> {
        self.mode
    }

    /// The form as currently typed.
    pub fn draft(&self) -> &FormValues {
        &self.draft
    }

    /// Change one draft field. The store is not touched.
    pub fn set_draft(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.draft.insert(field.into(), value.into());
    }

    /// Merge `values` into the draft and build the record they describe.
    ///
    /// The draft keeps the merged values whether or not validation passes, so
    /// the form can be corrected and resubmitted.
    pub fn prepare(&mut self, store: &RecordStore<R>, values: FormValues) -> Result<Prepared<R>> {
        let Some(mode) = self.mode else {
            return Err(ValidationErrors::single(FieldIssue::invalid(
                "form",
                "no record is open",
            ))
            .into());
        };
        self.draft.extend(values);

        let patch = typed_patch::<R>(&self.draft)?;
        let record = match mode {
            ModalMode::Create => {
                let mut base = R::template();
                base.set_id(store.next_id()?);
                merge_fields(&base, &patch)?
            }
            ModalMode::Edit(id) => {
                let current = store.get(id).ok_or(PlacementError::NotFound(id))?;
                merge_fields(current, &patch)?
            }
        };
        Ok(Prepared {
            mode,
            record,
            patch,
        })
    }

    /// Validate and write the draft, then close.
    ///
    /// On any error the store is unchanged and the modal stays open.
    pub fn submit(&mut self, store: &mut RecordStore<R>, values: FormValues) -> Result<RecordId> {
        let prepared = self.prepare(store, values)?;
        let id = match prepared.mode {
            ModalMode::Create => store.insert_new(prepared.record)?,
            ModalMode::Edit(id) => store.patch(id, &prepared.patch)?.id(),
        };
        self.close();
        Ok(id)
    }
}

/// Form strings for every editable field of `record`.
pub fn form_values<R: Record>(record: &R) -> FormValues {
    R::config()
        .editable()
        .map(|spec| {
            let raw = record
                .get_field(spec.name)
                .map(|value| value.to_form_string())
                .unwrap_or_default();
            (spec.name.to_string(), raw)
        })
        .collect()
}

/// Coerce a whole form, collecting every missing and invalid field.
pub fn typed_patch<R: Record>(values: &FormValues) -> std::result::Result<FieldPatch, ValidationErrors> {
    let config = R::config();
    let mut errors = ValidationErrors::new();
    let mut patch = FieldPatch::new();

    for name in values.keys() {
        match config.field(name) {
            None => errors.push(FieldIssue::invalid(name.as_str(), "unknown field")),
            Some(spec) if spec.read_only => {
                errors.push(FieldIssue::invalid(name.as_str(), "is read-only"))
            }
            Some(_) => {}
        }
    }

    for spec in config.editable() {
        let raw = values.get(spec.name).map(String::as_str).unwrap_or("");
        match spec.coerce_input(raw) {
            Ok(None) if spec.required => errors.push(FieldIssue::missing(spec.name)),
            Ok(value) => {
                patch.insert(spec.name.to_string(), value);
            }
            Err(reason) => errors.push(FieldIssue::invalid(spec.name, reason)),
        }
    }

    errors.into_result()?;
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{demo, Application, ApplicationStatus, Report};
    use crate::store::fixtures::{application_store, report_store};

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete_application() -> FormValues {
        values(&[
            ("studentName", "Sara Mohamed"),
            ("jobTitle", "UX Intern"),
            ("company", "Breadfast"),
            ("postId", "2"),
            ("appliedDate", "2025-05-11"),
            ("status", "pending"),
            ("skills", "Figma, Research"),
        ])
    }

    #[test]
    fn create_with_empty_job_title_lists_it_and_writes_nothing() {
        let mut store = application_store();
        let before = store.records().to_vec();
        let mut modal = DetailModal::<Application>::new();
        modal.open(None);

        let mut form = complete_application();
        form.insert("jobTitle".into(), String::new());
        let err = modal.submit(&mut store, form).unwrap_err();

        let PlacementError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.missing_fields(), vec!["jobTitle"]);
        assert_eq!(store.records(), before.as_slice());
        assert!(modal.is_open());
    }

    #[test]
    fn every_problem_is_reported() {
        let mut store = application_store();
        let mut modal = DetailModal::<Application>::new();
        modal.open(None);

        let form = values(&[
            ("studentName", ""),
            ("jobTitle", ""),
            ("postId", "abc"),
            ("appliedDate", "yesterday"),
            ("status", "Lost"),
            ("id", "9"),
        ]);
        let Err(PlacementError::Validation(errors)) = modal.submit(&mut store, form) else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.missing_fields(),
            vec!["studentName", "jobTitle", "company"]
        );
        assert_eq!(
            errors.invalid_fields(),
            vec!["id", "postId", "appliedDate", "status"]
        );
    }

    #[test]
    fn create_inserts_under_next_id_and_closes() {
        let mut store = application_store();
        let mut modal = DetailModal::<Application>::new();
        modal.open(None);

        let id = modal.submit(&mut store, complete_application()).unwrap();
        assert_eq!(id, 5);
        let created = store.get(5).unwrap();
        assert_eq!(created.status, ApplicationStatus::Pending);
        assert_eq!(created.skills, vec!["Figma", "Research"]);
        assert!(!modal.is_open());
    }

    #[test]
    fn create_without_a_free_id_keeps_the_form_open() {
        let mut store = application_store();
        let mut last = Application::template();
        last.id = crate::record::MAX_RECORD_ID;
        store.upsert(last);
        let before = store.records().to_vec();
        let mut modal = DetailModal::<Application>::new();
        modal.open(None);

        let err = modal.submit(&mut store, complete_application()).unwrap_err();
        assert!(matches!(err, PlacementError::IdsExhausted("applications")));
        assert_eq!(store.records(), before.as_slice());
        assert!(modal.is_open());
    }

    #[test]
    fn edit_starts_from_a_copy() {
        let mut store = application_store();
        let mut modal = DetailModal::new();
        modal.open(store.get(1));
        assert_eq!(modal.mode(), Some(ModalMode::Edit(1)));
        assert_eq!(modal.draft()["studentName"], "Ahmed Hassan");
        assert_eq!(modal.draft()["appliedDate"], "2025-05-10");
        assert!(!modal.draft().contains_key("id"));

        modal.set_draft("company", "Orange");
        assert_eq!(store.get(1).unwrap().company, "Instabug");

        modal.submit(&mut store, FormValues::new()).unwrap();
        assert_eq!(store.get(1).unwrap().company, "Orange");
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn edit_of_vanished_record_is_not_found() {
        let mut store = application_store();
        let mut modal = DetailModal::new();
        modal.open(store.get(2));
        store.remove(2);

        let err = modal.submit(&mut store, FormValues::new()).unwrap_err();
        assert!(matches!(err, PlacementError::NotFound(2)));
    }

    #[test]
    fn submit_without_open_form_is_refused() {
        let mut store = application_store();
        let mut modal = DetailModal::<Application>::new();
        assert!(modal.submit(&mut store, complete_application()).is_err());
        assert_eq!(store.len(), demo::applications().len());
    }

    #[test]
    fn report_form_cannot_touch_review_fields() {
        let mut store = report_store();
        let mut modal = DetailModal::<Report>::new();
        modal.open(store.get(1));
        assert!(!modal.draft().contains_key("status"));

        let err = modal
            .submit(&mut store, values(&[("status", "Accepted")]))
            .unwrap_err();
        let PlacementError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.invalid_fields(), vec!["status"]);
    }

    #[test]
    fn prepare_does_not_write() {
        let store = application_store();
        let mut modal = DetailModal::<Application>::new();
        modal.open(None);
        let prepared = modal.prepare(&store, complete_application()).unwrap();
        assert_eq!(prepared.record.id, 5);
        assert_eq!(store.len(), 4);
    }
}
