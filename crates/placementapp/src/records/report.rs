use super::{deserialize_id, id_value, take_date, take_enum, take_optional, take_text, today};
use crate::error::{FieldIssue, ValidationErrors};
use crate::fields::{FieldKind, FieldSpec, FieldValue, ListConfig};
use crate::record::{Record, RecordId};
use crate::review::{is_blank, ReviewStatus, Reviewable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An internship report submitted by a student for review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub title: String,
    pub student_name: String,
    pub company: String,
    pub major: String,
    pub submitted_date: NaiveDate,
    #[serde(default)]
    pub status: ReviewStatus,
    /// Why the report was flagged or rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// Status and reason are read-only for forms: they only change through the
// review workflow.
pub static REPORT_CONFIG: ListConfig = ListConfig {
    family: "reports",
    status_field: "status",
    fields: &[
        FieldSpec::new("id", "ID", FieldKind::Int)
            .sortable()
            .read_only(),
        FieldSpec::new("title", "Title", FieldKind::Text)
            .searchable()
            .sortable()
            .required(),
        FieldSpec::new("studentName", "Student", FieldKind::Text)
            .searchable()
            .sortable()
            .required(),
        FieldSpec::new("company", "Company", FieldKind::Text)
            .searchable()
            .filterable()
            .sortable()
            .required(),
        FieldSpec::new("major", "Major", FieldKind::Text)
            .filterable()
            .sortable()
            .required(),
        FieldSpec::new("submittedDate", "Submitted", FieldKind::Date)
            .sortable()
            .required(),
        FieldSpec::new("status", "Status", FieldKind::Enum)
            .filterable()
            .sortable()
            .read_only()
            .choices(ReviewStatus::LABELS),
        FieldSpec::new("reason", "Reason", FieldKind::Text)
            .searchable()
            .read_only(),
    ],
};

impl Record for Report {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn config() -> &'static ListConfig {
        &REPORT_CONFIG
    }

    fn template() -> Self {
        Self {
            id: 0,
            title: String::new(),
            student_name: String::new(),
            company: String::new(),
            major: String::new(),
            submitted_date: today(),
            status: ReviewStatus::Pending,
            reason: None,
        }
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(id_value(self.id)),
            "title" => Some(FieldValue::text(&self.title)),
            "studentName" => Some(FieldValue::text(&self.student_name)),
            "company" => Some(FieldValue::text(&self.company)),
            "major" => Some(FieldValue::text(&self.major)),
            "submittedDate" => Some(FieldValue::Date(self.submitted_date)),
            "status" => Some(FieldValue::Enum(self.status.as_str().into())),
            "reason" => self.reason.as_ref().map(FieldValue::text),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Option<()> {
        match name {
            "title" => self.title = take_text(value)?,
            "studentName" => self.student_name = take_text(value)?,
            "company" => self.company = take_text(value)?,
            "major" => self.major = take_text(value)?,
            "submittedDate" => self.submitted_date = take_date(value)?,
            "status" => self.status = take_enum(value, ReviewStatus::parse)?,
            "reason" => self.reason = take_optional(value, take_text)?,
            _ => return None,
        }
        Some(())
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn check_update(&self, next: &Self) -> Result<(), ValidationErrors> {
        if self.status != next.status {
            self.status
                .check_transition(next.status, next.reason.as_deref())
                .map_err(ValidationErrors::from)?;
        }
        let blank = is_blank(next.reason.as_deref());
        if next.status.requires_reason() && blank {
            return Err(ValidationErrors::single(FieldIssue::missing("reason")));
        }
        if !next.status.requires_reason() && !blank {
            return Err(ValidationErrors::single(FieldIssue::invalid(
                "reason",
                "only flagged or rejected reports carry a reason",
            )));
        }
        Ok(())
    }
}

impl Reviewable for Report {
    fn review_status(&self) -> ReviewStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> Report {
        Report {
            id: 1,
            title: "Summer at Valeo".into(),
            student_name: "Ahmed Hassan".into(),
            company: "Valeo".into(),
            major: "Computer Engineering".into(),
            submitted_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            status: ReviewStatus::Pending,
            reason: None,
        }
    }

    #[test]
    fn flagging_without_reason_is_refused() {
        let current = pending();
        let mut next = current.clone();
        next.status = ReviewStatus::Flagged;

        let errors = current.check_update(&next).unwrap_err();
        assert_eq!(errors.missing_fields(), vec!["reason"]);
    }

    #[test]
    fn flagging_with_reason_is_accepted() {
        let current = pending();
        let mut next = current.clone();
        next.status = ReviewStatus::Flagged;
        next.reason = Some("Missing supervisor signature".into());

        assert!(current.check_update(&next).is_ok());
    }

    #[test]
    fn accepted_report_cannot_be_rejected() {
        let mut current = pending();
        current.status = ReviewStatus::Accepted;
        let mut next = current.clone();
        next.status = ReviewStatus::Rejected;
        next.reason = Some("late".into());

        let errors = current.check_update(&next).unwrap_err();
        assert_eq!(errors.invalid_fields(), vec!["status"]);
    }

    #[test]
    fn clearing_reason_of_flagged_report_is_refused() {
        let mut current = pending();
        current.status = ReviewStatus::Flagged;
        current.reason = Some("x".into());
        let mut next = current.clone();
        next.reason = None;

        assert!(current.check_update(&next).is_err());
    }

    #[test]
    fn editing_other_fields_passes_the_guard() {
        let current = pending();
        let mut next = current.clone();
        next.title = "Revised".into();
        assert!(current.check_update(&next).is_ok());
    }

    #[test]
    fn accepting_keeps_no_earlier_reason() {
        let mut current = pending();
        current.status = ReviewStatus::Flagged;
        current.reason = Some("Missing supervisor evaluation".into());
        let mut next = current.clone();
        next.status = ReviewStatus::Accepted;

        let errors = current.check_update(&next).unwrap_err();
        assert_eq!(errors.invalid_fields(), vec!["reason"]);

        next.reason = None;
        assert!(current.check_update(&next).is_ok());
    }

    #[test]
    fn pending_report_refuses_a_reason() {
        let current = pending();
        let mut next = current.clone();
        next.reason = Some("stray".into());

        let errors = current.check_update(&next).unwrap_err();
        assert_eq!(errors.invalid_fields(), vec!["reason"]);
    }

    #[test]
    fn blank_reason_on_pending_report_is_ignored() {
        let current = pending();
        let mut next = current.clone();
        next.reason = Some("  ".into());
        assert!(current.check_update(&next).is_ok());
    }

    #[test]
    fn absent_reason_reads_as_none() {
        assert_eq!(pending().get_field("reason"), None);
    }
}
