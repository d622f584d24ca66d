//! # Review Workflow
//!
//! Report reviews move through a small state machine:
//!
//! ```text
//!            accept                    accept
//! Pending ───────────▶ Accepted ◀─────────────── Flagged / Rejected
//!    │                                                  ▲
//!    └──────── flag / reject (reason required) ─────────┘
//! ```
//!
//! - `Pending -> Accepted` is direct.
//! - `Pending -> Flagged | Rejected` needs a non-blank reason, written together
//!   with the status in one update.
//! - `Flagged | Rejected -> Accepted` is direct and clears the reason.
//! - Nothing moves back to `Pending`, out of `Accepted`, or between `Flagged`
//!   and `Rejected`.
//!
//! [`ReviewPrompt`] is the two-step confirm used by the review page: asking
//! for a reason-requiring status parks the request until the reason arrives,
//! and no status is written before that.

use crate::error::{FieldIssue, ValidationErrors};
use crate::fields::{FieldPatch, FieldValue};
use crate::record::RecordId;
use thiserror::Error;

crate::records::closed_set! {
    /// Review state of a submitted report.
    pub enum ReviewStatus {
        Pending => "Pending",
        Accepted => "Accepted",
        Flagged => "Flagged",
        Rejected => "Rejected",
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("report is already {0}")]
    Unchanged(ReviewStatus),

    #[error("cannot move a report from {from} to {to}")]
    NotAllowed { from: ReviewStatus, to: ReviewStatus },

    #[error("a reason is required to mark a report {0}")]
    ReasonRequired(ReviewStatus),
}

impl TransitionError {
    /// The form-level issue this error is reported as.
    pub fn into_issue(self) -> FieldIssue {
        match self {
            TransitionError::ReasonRequired(_) => FieldIssue::missing("reason"),
            other => FieldIssue::invalid("status", other.to_string()),
        }
    }
}

impl From<TransitionError> for ValidationErrors {
    fn from(err: TransitionError) -> Self {
        ValidationErrors::single(err.into_issue())
    }
}

impl ReviewStatus {
    /// Whether entering this status needs a supplementary reason.
    pub fn requires_reason(self) -> bool {
        matches!(self, ReviewStatus::Flagged | ReviewStatus::Rejected)
    }

    /// Whether the state machine has an edge from `self` to `to`.
    pub fn can_move_to(self, to: ReviewStatus) -> bool {
        use ReviewStatus::*;
        matches!(
            (self, to),
            (Pending, Accepted)
                | (Pending, Flagged)
                | (Pending, Rejected)
                | (Flagged, Accepted)
                | (Rejected, Accepted)
        )
    }

    /// Check a full transition, including its reason.
    pub fn check_transition(
        self,
        to: ReviewStatus,
        reason: Option<&str>,
    ) -> Result<(), TransitionError> {
        if self == to {
            return Err(TransitionError::Unchanged(to));
        }
        if !self.can_move_to(to) {
            return Err(TransitionError::NotAllowed { from: self, to });
        }
        if to.requires_reason() && is_blank(reason) {
            return Err(TransitionError::ReasonRequired(to));
        }
        Ok(())
    }
}

pub(crate) fn is_blank(text: Option<&str>) -> bool {
    text.map(|t| t.trim().is_empty()).unwrap_or(true)
}

/// Records whose status is a [`ReviewStatus`].
pub trait Reviewable: crate::record::Record {
    fn review_status(&self) -> ReviewStatus;
}

/// The update that puts a record into `target`.
///
/// Accepting clears any earlier reason; flagging and rejecting store it.
pub fn review_patch(target: ReviewStatus, reason: Option<&str>) -> FieldPatch {
    let mut patch = FieldPatch::new();
    patch.insert(
        "status".to_string(),
        Some(FieldValue::Enum(target.as_str().to_string())),
    );
    let reason = if target.requires_reason() {
        reason.map(|r| FieldValue::Text(r.trim().to_string()))
    } else {
        None
    };
    patch.insert("reason".to_string(), reason);
    patch
}

/// Result of asking for a review transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewStep {
    /// The transition can be written now.
    Ready { id: RecordId, patch: FieldPatch },
    /// The transition is parked until a reason is supplied.
    NeedsReason { id: RecordId, target: ReviewStatus },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AwaitingReason {
    id: RecordId,
    target: ReviewStatus,
}

/// Two-step confirm for status transitions that need a reason.
#[derive(Debug, Default)]
pub struct ReviewPrompt {
    awaiting: Option<AwaitingReason>,
}

impl ReviewPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to move record `id` from `current` to `target`.
    ///
    /// A new request replaces any request still waiting for its reason.
    pub fn request(
        &mut self,
        id: RecordId,
        current: ReviewStatus,
        target: ReviewStatus,
    ) -> Result<ReviewStep, TransitionError> {
        self.awaiting = None;
        if current == target {
            return Err(TransitionError::Unchanged(target));
        }
        if !current.can_move_to(target) {
            return Err(TransitionError::NotAllowed {
                from: current,
                to: target,
            });
        }

        if target.requires_reason() {
            self.awaiting = Some(AwaitingReason { id, target });
            Ok(ReviewStep::NeedsReason { id, target })
        } else {
            Ok(ReviewStep::Ready {
                id,
                patch: review_patch(target, None),
            })
        }
    }

    /// Supply the reason for the parked request.
    ///
    /// A blank reason keeps the request parked.
    pub fn supply_reason(
        &mut self,
        reason: &str,
    ) -> Result<(RecordId, FieldPatch), ValidationErrors> {
        let Some(awaiting) = self.awaiting else {
            return Err(ValidationErrors::single(FieldIssue::invalid(
                "reason",
                "no review is waiting for a reason",
            )));
        };
        if reason.trim().is_empty() {
            return Err(ValidationErrors::single(FieldIssue::missing("reason")));
        }

        self.awaiting = None;
        Ok((awaiting.id, review_patch(awaiting.target, Some(reason))))
    }

    pub fn cancel(&mut self) {
        self.awaiting = None;
    }

    /// The record and target status waiting for a reason, if any.
    pub fn awaiting(&self) -> Option<(RecordId, ReviewStatus)> {
        self.awaiting.map(|a| (a.id, a.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReviewStatus::*;

    #[test]
    fn pending_to_accepted_is_direct() {
        assert!(Pending.check_transition(Accepted, None).is_ok());
    }

    #[test]
    fn pending_to_flagged_requires_reason() {
        assert_eq!(
            Pending.check_transition(Flagged, None),
            Err(TransitionError::ReasonRequired(Flagged))
        );
        assert_eq!(
            Pending.check_transition(Rejected, Some("   ")),
            Err(TransitionError::ReasonRequired(Rejected))
        );
        assert!(Pending.check_transition(Flagged, Some("plagiarism")).is_ok());
    }

    #[test]
    fn flagged_and_rejected_can_be_accepted() {
        assert!(Flagged.check_transition(Accepted, None).is_ok());
        assert!(Rejected.check_transition(Accepted, None).is_ok());
    }

    #[test]
    fn no_automatic_reversal() {
        for (from, to) in [
            (Accepted, Pending),
            (Accepted, Flagged),
            (Accepted, Rejected),
            (Flagged, Rejected),
            (Rejected, Flagged),
            (Flagged, Pending),
        ] {
            assert_eq!(
                from.check_transition(to, Some("reason")),
                Err(TransitionError::NotAllowed { from, to }),
                "{from} -> {to}"
            );
        }
    }

    #[test]
    fn same_status_is_unchanged() {
        assert_eq!(
            Flagged.check_transition(Flagged, Some("x")),
            Err(TransitionError::Unchanged(Flagged))
        );
    }

    #[test]
    fn reason_required_maps_to_missing_reason_issue() {
        let errors: ValidationErrors = TransitionError::ReasonRequired(Flagged).into();
        assert_eq!(errors.missing_fields(), vec!["reason"]);
    }

    #[test]
    fn accept_patch_clears_reason() {
        let patch = review_patch(Accepted, Some("ignored"));
        assert_eq!(
            patch.get("status"),
            Some(&Some(FieldValue::Enum("Accepted".into())))
        );
        assert_eq!(patch.get("reason"), Some(&None));
    }

    #[test]
    fn prompt_accept_is_ready_immediately() {
        let mut prompt = ReviewPrompt::new();
        let step = prompt.request(4, Pending, Accepted).unwrap();
        assert!(matches!(step, ReviewStep::Ready { id: 4, .. }));
        assert_eq!(prompt.awaiting(), None);
    }

    #[test]
    fn prompt_flag_waits_for_reason() {
        let mut prompt = ReviewPrompt::new();
        let step = prompt.request(4, Pending, Flagged).unwrap();
        assert_eq!(
            step,
            ReviewStep::NeedsReason {
                id: 4,
                target: Flagged
            }
        );
        assert_eq!(prompt.awaiting(), Some((4, Flagged)));

        let blank = prompt.supply_reason("  ").unwrap_err();
        assert_eq!(blank.missing_fields(), vec!["reason"]);
        assert_eq!(prompt.awaiting(), Some((4, Flagged)));

        let (id, patch) = prompt.supply_reason(" Missing signature ").unwrap();
        assert_eq!(id, 4);
        assert_eq!(
            patch.get("reason"),
            Some(&Some(FieldValue::Text("Missing signature".into())))
        );
        assert_eq!(prompt.awaiting(), None);
    }

    #[test]
    fn prompt_cancel_drops_request() {
        let mut prompt = ReviewPrompt::new();
        prompt.request(4, Pending, Rejected).unwrap();
        prompt.cancel();
        assert!(prompt.supply_reason("late").is_err());
    }

    #[test]
    fn prompt_refuses_illegal_request_and_clears_parked_one() {
        let mut prompt = ReviewPrompt::new();
        prompt.request(1, Pending, Flagged).unwrap();
        let err = prompt.request(2, Accepted, Rejected).unwrap_err();
        assert_eq!(
            err,
            TransitionError::NotAllowed {
                from: Accepted,
                to: Rejected
            }
        );
        assert_eq!(prompt.awaiting(), None);
    }
}
