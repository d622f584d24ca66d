use super::{
    deserialize_id, id_value, take_bool, take_date, take_enum, take_int, take_list,
    take_optional, take_text, today,
};
use crate::fields::{FieldKind, FieldSpec, FieldValue, ListConfig};
use crate::record::{Record, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

closed_set! {
    pub enum PostStatus {
        Active => "Active",
        Closed => "Closed",
        Draft => "Draft",
    }
}

/// An internship opening published by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipPost {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub job_title: String,
    pub company: String,
    pub location: String,
    /// Free text such as "3 months"
    pub duration: String,
    #[serde(default)]
    pub paid: bool,
    /// Monthly salary, only meaningful for paid posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub posted_date: NaiveDate,
    #[serde(default)]
    pub applicants: i64,
    #[serde(default)]
    pub status: PostStatus,
}

pub static POST_CONFIG: ListConfig = ListConfig {
    family: "posts",
    status_field: "status",
    fields: &[
        FieldSpec::new("id", "ID", FieldKind::Int)
            .filterable()
            .sortable()
            .read_only(),
        FieldSpec::new("jobTitle", "Job Title", FieldKind::Text)
            .searchable()
            .sortable()
            .required(),
        FieldSpec::new("company", "Company", FieldKind::Text)
            .searchable()
            .filterable()
            .sortable()
            .required(),
        FieldSpec::new("location", "Location", FieldKind::Text)
            .searchable()
            .filterable()
            .required(),
        FieldSpec::new("duration", "Duration", FieldKind::Text)
            .filterable()
            .required(),
        FieldSpec::new("paid", "Paid", FieldKind::Bool).filterable(),
        FieldSpec::new("salary", "Salary", FieldKind::Int).sortable(),
        FieldSpec::new("skills", "Skills", FieldKind::List)
            .searchable()
            .filterable(),
        FieldSpec::new("postedDate", "Posted", FieldKind::Date)
            .sortable()
            .required(),
        FieldSpec::new("applicants", "Applicants", FieldKind::Int).sortable(),
        FieldSpec::new("status", "Status", FieldKind::Enum)
            .filterable()
            .sortable()
            .required()
            .choices(PostStatus::LABELS),
    ],
};

impl Record for InternshipPost {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn config() -> &'static ListConfig {
        &POST_CONFIG
    }

    fn template() -> Self {
        Self {
            id: 0,
            job_title: String::new(),
            company: String::new(),
            location: String::new(),
            duration: String::new(),
            paid: false,
            salary: None,
            skills: Vec::new(),
            posted_date: today(),
            applicants: 0,
            status: PostStatus::Draft,
        }
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(id_value(self.id)),
            "jobTitle" => Some(FieldValue::text(&self.job_title)),
            "company" => Some(FieldValue::text(&self.company)),
            "location" => Some(FieldValue::text(&self.location)),
            "duration" => Some(FieldValue::text(&self.duration)),
            "paid" => Some(FieldValue::Bool(self.paid)),
            "salary" => self.salary.map(FieldValue::Int),
            "skills" => Some(FieldValue::List(self.skills.clone())),
            "postedDate" => Some(FieldValue::Date(self.posted_date)),
            "applicants" => Some(FieldValue::Int(self.applicants)),
            "status" => Some(FieldValue::Enum(self.status.as_str().into())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Option<()> {
        match name {
            "jobTitle" => self.job_title = take_text(value)?,
            "company" => self.company = take_text(value)?,
            "location" => self.location = take_text(value)?,
            "duration" => self.duration = take_text(value)?,
            "paid" => self.paid = take_optional(value, take_bool)?.unwrap_or(false),
            "salary" => self.salary = take_optional(value, take_int)?,
            "skills" => self.skills = take_optional(value, take_list)?.unwrap_or_default(),
            "postedDate" => self.posted_date = take_date(value)?,
            "applicants" => self.applicants = take_optional(value, take_int)?.unwrap_or(0),
            "status" => self.status = take_enum(value, PostStatus::parse)?,
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

    #[test]
    fn unpaid_post_has_no_salary_value() {
        let post = InternshipPost::template();
        assert_eq!(post.get_field("salary"), None);
        assert_eq!(post.get_field("paid"), Some(FieldValue::Bool(false)));
    }

    #[test]
    fn salary_can_be_set_and_cleared() {
        let mut post = InternshipPost::template();
        post.set_field("salary", Some(FieldValue::Int(4000))).unwrap();
        assert_eq!(post.salary, Some(4000));
        post.set_field("salary", None).unwrap();
        assert_eq!(post.salary, None);
    }

    #[test]
    fn new_posts_start_as_drafts() {
        assert_eq!(InternshipPost::template().status, PostStatus::Draft);
    }
}
