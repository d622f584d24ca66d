use super::{deserialize_id, id_value, take_date, take_enum, take_optional, take_text, today};
use crate::error::{FieldIssue, ValidationErrors};
use crate::fields::{FieldKind, FieldSpec, FieldValue, ListConfig};
use crate::record::{Record, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

closed_set! {
    pub enum InternStatus {
        Current => "Current",
        Completed => "Completed",
    }
}

/// A student currently or previously interning at a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intern {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub student_name: String,
    pub job_title: String,
    pub company: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: InternStatus,
}

pub static INTERN_CONFIG: ListConfig = ListConfig {
    family: "interns",
    status_field: "status",
    fields: &[
        FieldSpec::new("id", "ID", FieldKind::Int)
            .sortable()
            .read_only(),
        FieldSpec::new("studentName", "Student", FieldKind::Text)
            .searchable()
            .sortable()
            .required(),
        FieldSpec::new("jobTitle", "Job Title", FieldKind::Text)
            .searchable()
            .sortable()
            .required(),
        FieldSpec::new("company", "Company", FieldKind::Text)
            .searchable()
            .filterable()
            .sortable()
            .required(),
        FieldSpec::new("startDate", "Start", FieldKind::Date)
            .sortable()
            .required(),
        FieldSpec::new("endDate", "End", FieldKind::Date).sortable(),
        FieldSpec::new("status", "Status", FieldKind::Enum)
            .filterable()
            .sortable()
            .required()
            .choices(InternStatus::LABELS),
    ],
};

impl Record for Intern {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn config() -> &'static ListConfig {
        &INTERN_CONFIG
    }

    fn template() -> Self {
        Self {
            id: 0,
            student_name: String::new(),
            job_title: String::new(),
            company: String::new(),
            start_date: today(),
            end_date: None,
            status: InternStatus::Current,
        }
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(id_value(self.id)),
            "studentName" => Some(FieldValue::text(&self.student_name)),
            "jobTitle" => Some(FieldValue::text(&self.job_title)),
            "company" => Some(FieldValue::text(&self.company)),
            "startDate" => Some(FieldValue::Date(self.start_date)),
            "endDate" => self.end_date.map(FieldValue::Date),
            "status" => Some(FieldValue::Enum(self.status.as_str().into())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Option<()> {
        match name {
            "studentName" => self.student_name = take_text(value)?,
            "jobTitle" => self.job_title = take_text(value)?,
            "company" => self.company = take_text(value)?,
            "startDate" => self.start_date = take_date(value)?,
            "endDate" => self.end_date = take_optional(value, take_date)?,
            "status" => self.status = take_enum(value, InternStatus::parse)?,
            _ => return None,
        }
        Some(())
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn check_update(&self, next: &Self) -> Result<(), ValidationErrors> {
        match next.end_date {
            Some(end) if end < next.start_date => Err(ValidationErrors::single(
                FieldIssue::invalid("endDate", "must not be before startDate"),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_before_start_is_refused() {
        let current = Intern::template();
        let mut next = current.clone();
        next.end_date = current.start_date.pred_opt();

        let errors = current.check_update(&next).unwrap_err();
        assert_eq!(errors.invalid_fields(), vec!["endDate"]);
    }

    #[test]
    fn open_ended_internship_is_fine() {
        let current = Intern::template();
        assert!(current.check_update(&current.clone()).is_ok());
        assert_eq!(current.get_field("endDate"), None);
    }
}
