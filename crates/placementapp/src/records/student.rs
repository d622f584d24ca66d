use super::{
    deserialize_id, id_value, take_enum, take_float, take_int, take_list, take_optional,
    take_text,
};
use crate::error::{FieldIssue, ValidationErrors};
use crate::fields::{FieldKind, FieldSpec, FieldValue, ListConfig};
use crate::record::{Record, RecordId};
use serde::{Deserialize, Serialize};

closed_set! {
    pub enum StudentStatus {
        Active => "Active",
        OnInternship => "On Internship",
        Graduated => "Graduated",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub major: String,
    pub semester: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: StudentStatus,
}

pub static STUDENT_CONFIG: ListConfig = ListConfig {
    family: "students",
    status_field: "status",
    fields: &[
        FieldSpec::new("id", "ID", FieldKind::Int)
            .sortable()
            .read_only(),
        FieldSpec::new("name", "Name", FieldKind::Text)
            .searchable()
            .sortable()
            .required(),
        FieldSpec::new("email", "Email", FieldKind::Text)
            .searchable()
            .required(),
        FieldSpec::new("major", "Major", FieldKind::Text)
            .searchable()
            .filterable()
            .sortable()
            .required(),
        FieldSpec::new("semester", "Semester", FieldKind::Int)
            .filterable()
            .sortable()
            .required(),
        FieldSpec::new("gpa", "GPA", FieldKind::Float).sortable(),
        FieldSpec::new("skills", "Skills", FieldKind::List)
            .searchable()
            .filterable(),
        FieldSpec::new("status", "Status", FieldKind::Enum)
            .filterable()
            .sortable()
            .required()
            .choices(StudentStatus::LABELS),
    ],
};

impl Record for Student {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn config() -> &'static ListConfig {
        &STUDENT_CONFIG
    }

    fn template() -> Self {
        Self {
            id: 0,
            name: String::new(),
            email: String::new(),
            major: String::new(),
            semester: 1,
            gpa: None,
            skills: Vec::new(),
            status: StudentStatus::Active,
        }
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(id_value(self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "email" => Some(FieldValue::text(&self.email)),
            "major" => Some(FieldValue::text(&self.major)),
            "semester" => Some(FieldValue::Int(self.semester)),
            "gpa" => self.gpa.map(FieldValue::Float),
            "skills" => Some(FieldValue::List(self.skills.clone())),
            "status" => Some(FieldValue::Enum(self.status.as_str().into())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Option<()> {
        match name {
            "name" => self.name = take_text(value)?,
            "email" => self.email = take_text(value)?,
            "major" => self.major = take_text(value)?,
            "semester" => self.semester = take_int(value)?,
            "gpa" => self.gpa = take_optional(value, take_float)?,
            "skills" => self.skills = take_optional(value, take_list)?.unwrap_or_default(),
            "status" => self.status = take_enum(value, StudentStatus::parse)?,
            _ => return None,
        }
        Some(())
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn check_update(&self, next: &Self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !(1..=12).contains(&next.semester) {
            errors.push(FieldIssue::invalid("semester", "must be between 1 and 12"));
        }
        if let Some(gpa) = next.gpa {
            if !(0.0..=4.0).contains(&gpa) {
                errors.push(FieldIssue::invalid("gpa", "must be between 0.0 and 4.0"));
            }
        }
        errors.into_result()
    }
}
