//! # List View Controller
//!
//! One generic controller per list page. It owns the page's
//! [`RecordStore`], its [`FilterState`] and optional [`SortState`], the
//! [`DetailModal`] and the [`ReviewPrompt`], and gets its collaborators
//! injected: a [`Session`], a [`Notifier`] and a [`DataSource`].
//!
//! ## Writes
//!
//! Every mutation is validated first, then sent to the data source, and only
//! committed to the store once the source accepted it. A failure at any step
//! leaves the store as it was:
//!
//! - validation problems are returned to the caller (the form shows them),
//! - a missing record produces an error notice and resets the modal and any
//!   pending review prompt,
//! - a transport failure produces an error notice; the user can retry.
//!
//! ## Loads
//!
//! Loading is split into [`ListController::begin_load`], which hands out a
//! [`LoadTicket`], and [`ListController::finish_load`], which applies the
//! fetched records only if the ticket is still current and the controller is
//! still mounted. A result arriving after [`ListController::unmount`] or after
//! a newer load started is dropped. Writes after an unmount are refused with
//! [`PlacementError::Unmounted`] and reach neither the source nor the store.

use crate::error::{PlacementError, Result, ValidationErrors};
use crate::export::{summarize, ExportBlob, ReportExporter, StatusSummary};
use crate::fields::{FieldPatch, FormValues};
use crate::modal::{DetailModal, ModalMode};
use crate::notify::{Notice, Notifier};
use crate::record::{Record, RecordId};
use crate::review::{ReviewPrompt, ReviewStatus, ReviewStep, Reviewable, TransitionError};
use crate::session::Session;
use crate::store::{merge_fields, DataSource, RecordStore};
use crate::view::{derive_view, paginate, FilterChoice, FilterState, Page, PageRequest, SortState};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Proof that a load was started, checked when its result arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store was seeded with this many records.
    Applied(usize),
    /// A newer load was started; the result was dropped.
    Superseded,
    /// The controller was unmounted; the result was dropped.
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The record now has this status.
    Applied(ReviewStatus),
    /// Nothing was written; the transition waits for a reason.
    AwaitingReason(ReviewStatus),
}

pub struct ListController<R: Record, S: DataSource<R>> {
    session: Session,
    notifier: Box<dyn Notifier>,
    source: S,
    store: RecordStore<R>,
    filter: FilterState,
    sort: Option<SortState>,
    modal: DetailModal<R>,
    prompt: ReviewPrompt,
    generation: u64,
    loading: bool,
    mounted: bool,
    notice_duration: Option<Duration>,
}

impl<R: Record, S: DataSource<R>> ListController<R, S> {
    pub fn new(session: Session, notifier: impl Notifier + 'static, source: S) -> Self {
        Self {
            session,
            notifier: Box::new(notifier),
            source,
            store: RecordStore::new(),
            filter: FilterState::new(),
            sort: None,
            modal: DetailModal::new(),
            prompt: ReviewPrompt::new(),
            generation: 0,
            loading: false,
            mounted: true,
            notice_duration: None,
        }
    }

    /// Auto-dismiss delay for success notices.
    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = Some(duration);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn modal(&self) -> &DetailModal<R> {
        &self.modal
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // --- loading ---

    /// Start a load. Any earlier load still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Fetch from the data source for a started load.
    pub fn fetch(&self) -> Result<Vec<R>> {
        self.source.fetch_all()
    }

    /// Apply the result of the load `ticket` belongs to.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<R>>,
    ) -> Result<LoadOutcome> {
        if !self.mounted {
            debug!(family = R::config().family, "dropping load result after unmount");
            return Ok(LoadOutcome::Unmounted);
        }
        if ticket.generation != self.generation {
            debug!(
                family = R::config().family,
                ticket = ticket.generation,
                current = self.generation,
                "dropping superseded load result"
            );
            return Ok(LoadOutcome::Superseded);
        }

        self.loading = false;
        match result {
            Ok(records) => {
                let count = records.len();
                self.store.seed(records);
                Ok(LoadOutcome::Applied(count))
            }
            Err(err) => {
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    /// Begin, fetch and finish in one go.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        let ticket = self.begin_load();
        let result = self.fetch();
        self.finish_load(ticket, result)
    }

    /// Tear the page down. Pending loads are dropped when they finish, and
    /// any open form or review prompt is abandoned.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.loading = false;
        self.modal.close();
        self.prompt.cancel();
        debug!(family = R::config().family, "controller unmounted");
    }

    // --- filtering and sorting ---

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.set_search(text);
    }

    /// Set one field filter from a raw selection ("all" clears it).
    pub fn set_filter(&mut self, field: impl Into<String>, raw: &str) {
        self.filter.set_filter(field, FilterChoice::parse(raw));
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    /// Header click on `key`.
    pub fn toggle_sort(&mut self, key: &str) -> &SortState {
        let next = SortState::toggle(self.sort.as_ref(), key);
        self.sort.insert(next)
    }

    /// The rows to show, recomputed from the current state.
    pub fn view(&self) -> Vec<&R> {
        derive_view(self.store.records(), &self.filter, self.sort.as_ref())
    }

    pub fn page(&self, request: PageRequest) -> Page<'_, R> {
        paginate(self.view(), request)
    }

    // --- summaries ---

    /// Status counts over the whole store.
    pub fn summary(&self) -> StatusSummary {
        summarize(self.store.records())
    }

    /// Status counts over the rows currently shown.
    pub fn view_summary(&self) -> StatusSummary {
        summarize(self.view())
    }

    pub fn export(&self, exporter: &dyn ReportExporter) -> Result<ExportBlob> {
        let blob = exporter.export(&self.summary())?;
        self.notifier
            .notify(self.success_notice(format!("Exported {}", blob.filename)));
        Ok(blob)
    }

    // --- modal ---

    pub fn open_create(&mut self) {
        self.modal.open(None);
    }

    pub fn open_edit(&mut self, id: RecordId) -> Result<()> {
        match self.store.get(id) {
            Some(record) => {
                self.modal.open(Some(record));
                Ok(())
            }
            None => self.fail(PlacementError::NotFound(id)),
        }
    }

    pub fn set_draft(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.modal.set_draft(field, value);
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Submit the open form. The record is saved to the data source before
    /// it is committed to the store.
    pub fn submit(&mut self, values: FormValues) -> Result<RecordId> {
        self.ensure_mounted()?;
        let prepared = match self.modal.prepare(&self.store, values) {
            Ok(prepared) => prepared,
            Err(err) => return self.fail(err),
        };
        if let Err(err) = self.source.save(&prepared.record) {
            return self.fail(err);
        }

        let id = prepared.record.id();
        self.store.upsert(prepared.record);
        self.modal.close();

        let verb = match prepared.mode {
            ModalMode::Create => "created",
            ModalMode::Edit(_) => "updated",
        };
        info!(
            family = R::config().family,
            id,
            user = %self.session.user_name,
            "record {verb}"
        );
        self.notifier.notify(
            self.success_notice(format!("{} #{id} {verb}", R::config().family)),
        );
        Ok(id)
    }

    // --- direct mutations ---

    /// Merge `fields` into record `id`. Missing ids are an error.
    pub fn patch(&mut self, id: RecordId, fields: &FieldPatch) -> Result<&R> {
        self.ensure_mounted()?;
        let Some(current) = self.store.get(id) else {
            return self.fail(PlacementError::NotFound(id));
        };
        let next = match merge_fields(current, fields) {
            Ok(next) => next,
            Err(errors) => return self.fail(errors.into()),
        };
        if let Err(err) = self.source.save(&next) {
            return self.fail(err);
        }

        self.store.upsert(next);
        info!(
            family = R::config().family,
            id,
            user = %self.session.user_name,
            "record patched"
        );
        self.notifier.notify(
            self.success_notice(format!("{} #{id} updated", R::config().family)),
        );
        self.store.get(id).ok_or(PlacementError::NotFound(id))
    }

    /// Delete record `id`. Returns whether anything was deleted; a missing
    /// id is not an error.
    pub fn delete(&mut self, id: RecordId) -> Result<bool> {
        self.ensure_mounted()?;
        if !self.store.contains(id) {
            debug!(family = R::config().family, id, "delete of missing record ignored");
            return Ok(false);
        }
        if let Err(err) = self.source.remove(id) {
            return self.fail(err);
        }

        self.store.remove(id);
        if self.modal.mode() == Some(ModalMode::Edit(id)) {
            self.modal.close();
        }
        info!(
            family = R::config().family,
            id,
            user = %self.session.user_name,
            "record deleted"
        );
        self.notifier.notify(
            self.success_notice(format!("{} #{id} deleted", R::config().family)),
        );
        Ok(true)
    }

    // --- failures ---

    /// Writes are refused once the page is torn down. Nobody is left to
    /// notify, so no notice is sent.
    fn ensure_mounted(&self) -> Result<()> {
        if self.mounted {
            return Ok(());
        }
        debug!(family = R::config().family, "write refused after unmount");
        Err(PlacementError::Unmounted(R::config().family))
    }

    fn fail<T>(&mut self, err: PlacementError) -> Result<T> {
        self.report_failure(&err);
        Err(err)
    }

    fn report_failure(&mut self, err: &PlacementError) {
        match err {
            PlacementError::Validation(errors) => {
                debug!(family = R::config().family, %errors, "validation failed");
            }
            PlacementError::NotFound(id) => {
                warn!(family = R::config().family, id, "record no longer exists");
                self.modal.close();
                self.prompt.cancel();
                self.notifier.notify(Notice::error(format!(
                    "{} #{id} no longer exists",
                    R::config().family
                )));
            }
            PlacementError::Transport(message) => {
                warn!(family = R::config().family, %message, "data source failed");
                self.notifier.notify(Notice::error(format!(
                    "Could not reach the server ({message}). Please try again."
                )));
            }
            other => {
                warn!(family = R::config().family, error = %other, "operation failed");
                self.notifier.notify(Notice::error(other.to_string()));
            }
        }
    }

    fn success_notice(&self, message: String) -> Notice {
        let notice = Notice::success(message);
        match self.notice_duration {
            Some(duration) => notice.dismiss_after(duration),
            None => notice,
        }
    }
}

impl<R: Reviewable, S: DataSource<R>> ListController<R, S> {
    /// Ask to move record `id` to `target`.
    ///
    /// Transitions that need a reason are parked until
    /// [`ListController::supply_reason`]; nothing is written before that.
    pub fn request_review(&mut self, id: RecordId, target: ReviewStatus) -> Result<ReviewOutcome> {
        let Some(record) = self.store.get(id) else {
            return self.fail(PlacementError::NotFound(id));
        };
        let current = record.review_status();

        match self.prompt.request(id, current, target) {
            Ok(ReviewStep::Ready { id, patch }) => {
                self.patch(id, &patch)?;
                Ok(ReviewOutcome::Applied(target))
            }
            Ok(ReviewStep::NeedsReason { target, .. }) => {
                debug!(id, %target, "review waiting for reason");
                Ok(ReviewOutcome::AwaitingReason(target))
            }
            Err(err) => self.fail(ValidationErrors::from(err).into()),
        }
    }

    /// Complete the parked review with its reason. Status and reason are
    /// written in one update.
    pub fn supply_reason(&mut self, reason: &str) -> Result<ReviewStatus> {
        let (id, patch) = match self.prompt.supply_reason(reason) {
            Ok(parked) => parked,
            Err(errors) => return self.fail(errors.into()),
        };
        let record = self.patch(id, &patch)?;
        Ok(record.review_status())
    }

    pub fn cancel_review(&mut self) {
        self.prompt.cancel();
    }

    /// The review waiting for a reason, if any.
    pub fn pending_review(&self) -> Option<(RecordId, ReviewStatus)> {
        self.prompt.awaiting()
    }

    /// Request and, when needed, immediately supply the reason.
    ///
    /// Without a reason a reason-requiring transition is abandoned and
    /// reported as a missing `reason`.
    pub fn review(
        &mut self,
        id: RecordId,
        target: ReviewStatus,
        reason: Option<&str>,
    ) -> Result<ReviewStatus> {
        match self.request_review(id, target)? {
            ReviewOutcome::Applied(status) => Ok(status),
            ReviewOutcome::AwaitingReason(_) => match reason {
                Some(reason) if !reason.trim().is_empty() => self.supply_reason(reason),
                _ => {
                    self.prompt.cancel();
                    let errors = ValidationErrors::from(TransitionError::ReasonRequired(target));
                    self.fail(errors.into())
                }
            },
        }
    }
}
