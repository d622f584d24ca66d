use super::{
    deserialize_id, id_value, take_date, take_enum, take_id, take_list, take_optional, take_text,
    today,
};
use crate::fields::{FieldKind, FieldSpec, FieldValue, ListConfig};
use crate::record::{Record, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

closed_set! {
    /// Where a student's application to a post stands.
    pub enum ApplicationStatus {
        Pending => "Pending",
        Accepted => "Accepted",
        Rejected => "Rejected",
        Finalized => "Finalized",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub student_name: String,
    pub job_title: String,
    pub company: String,
    /// The internship post applied to
    #[serde(deserialize_with = "deserialize_id")]
    pub post_id: RecordId,
    pub applied_date: NaiveDate,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub skills: Vec<String>,
}

pub static APPLICATION_CONFIG: ListConfig = ListConfig {
    family: "applications",
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
        FieldSpec::new("postId", "Post", FieldKind::Int)
            .filterable()
            .required(),
        FieldSpec::new("appliedDate", "Applied", FieldKind::Date)
            .sortable()
            .required(),
        FieldSpec::new("status", "Status", FieldKind::Enum)
            .filterable()
            .sortable()
            .required()
            .choices(ApplicationStatus::LABELS),
        FieldSpec::new("skills", "Skills", FieldKind::List).filterable(),
    ],
};

impl Record for Application {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn config() -> &'static ListConfig {
        &APPLICATION_CONFIG
    }

    fn template() -> Self {
        Self {
            id: 0,
            student_name: String::new(),
            job_title: String::new(),
            company: String::new(),
            post_id: 0,
            applied_date: today(),
            status: ApplicationStatus::Pending,
            skills: Vec::new(),
        }
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(id_value(self.id)),
            "studentName" => Some(FieldValue::text(&self.student_name)),
            "jobTitle" => Some(FieldValue::text(&self.job_title)),
            "company" => Some(FieldValue::text(&self.company)),
            "postId" => Some(id_value(self.post_id)),
            "appliedDate" => Some(FieldValue::Date(self.applied_date)),
            "status" => Some(FieldValue::Enum(self.status.as_str().into())),
            "skills" => Some(FieldValue::List(self.skills.clone())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Option<()> {
        match name {
            "studentName" => self.student_name = take_text(value)?,
            "jobTitle" => self.job_title = take_text(value)?,
            "company" => self.company = take_text(value)?,
            "postId" => self.post_id = take_id(value)?,
            "appliedDate" => self.applied_date = take_date(value)?,
            "status" => self.status = take_enum(value, ApplicationStatus::parse)?,
            "skills" => self.skills = take_optional(value, take_list)?.unwrap_or_default(),
            _ => return None,
        }
        Some(())
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Application {
        Application {
            id: 1,
            student_name: "Ahmed Hassan".into(),
            job_title: "Frontend Intern".into(),
            company: "Instabug".into(),
            post_id: 3,
            applied_date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            status: ApplicationStatus::Pending,
            skills: vec!["React".into()],
        }
    }

    #[test]
    fn get_field_covers_every_configured_field() {
        let app = sample();
        for spec in APPLICATION_CONFIG.fields {
            assert!(app.get_field(spec.name).is_some(), "{}", spec.name);
        }
        assert!(app.get_field("unknown").is_none());
    }

    #[test]
    fn set_field_round_trips_through_get_field() {
        let mut app = sample();
        app.set_field("status", Some(FieldValue::Enum("Finalized".into())))
            .unwrap();
        assert_eq!(app.status, ApplicationStatus::Finalized);

        app.set_field("postId", Some(FieldValue::Int(12))).unwrap();
        assert_eq!(app.get_field("postId"), Some(FieldValue::Int(12)));
    }

    #[test]
    fn set_field_rejects_wrong_type_and_read_only_id() {
        let mut app = sample();
        assert!(app.set_field("appliedDate", Some(FieldValue::Int(1))).is_none());
        assert!(app.set_field("id", Some(FieldValue::Int(99))).is_none());
        assert!(app.set_field("jobTitle", None).is_none());
        assert_eq!(app, sample());
    }

    #[test]
    fn clearing_skills_empties_the_list() {
        let mut app = sample();
        app.set_field("skills", None).unwrap();
        assert!(app.skills.is_empty());
    }

    #[test]
    fn deserializes_camel_case_json() {
        let json = r#"{
            "id": 4,
            "studentName": "Sara Mohamed",
            "jobTitle": "Data Intern",
            "company": "Valeo",
            "postId": 2,
            "appliedDate": "2025-05-09",
            "status": "Accepted"
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.status, ApplicationStatus::Accepted);
        assert!(app.skills.is_empty());
    }
}
