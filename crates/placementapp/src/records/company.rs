use super::{deserialize_id, id_value, take_date, take_enum, take_text, today};
use crate::fields::{FieldKind, FieldSpec, FieldValue, ListConfig};
use crate::record::{Record, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

closed_set! {
    /// Outcome of a company's request to join the internship program.
    pub enum CompanyStatus {
        Pending => "Pending",
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

closed_set! {
    pub enum CompanySize {
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
        Corporate => "Corporate",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub name: String,
    pub industry: String,
    #[serde(default)]
    pub size: CompanySize,
    pub email: String,
    pub applied_date: NaiveDate,
    #[serde(default)]
    pub status: CompanyStatus,
}

pub static COMPANY_CONFIG: ListConfig = ListConfig {
    family: "companies",
    status_field: "status",
    fields: &[
        FieldSpec::new("id", "ID", FieldKind::Int)
            .sortable()
            .read_only(),
        FieldSpec::new("name", "Name", FieldKind::Text)
            .searchable()
            .sortable()
            .required(),
        FieldSpec::new("industry", "Industry", FieldKind::Text)
            .searchable()
            .filterable()
            .sortable()
            .required(),
        FieldSpec::new("size", "Size", FieldKind::Enum)
            .filterable()
            .sortable()
            .required()
            .choices(CompanySize::LABELS),
        FieldSpec::new("email", "Email", FieldKind::Text)
            .searchable()
            .required(),
        FieldSpec::new("appliedDate", "Applied", FieldKind::Date)
            .sortable()
            .required(),
        FieldSpec::new("status", "Status", FieldKind::Enum)
            .filterable()
            .sortable()
            .required()
            .choices(CompanyStatus::LABELS),
    ],
};

impl Record for Company {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn config() -> &'static ListConfig {
        &COMPANY_CONFIG
    }

    fn template() -> Self {
        Self {
            id: 0,
            name: String::new(),
            industry: String::new(),
            size: CompanySize::Small,
            email: String::new(),
            applied_date: today(),
            status: CompanyStatus::Pending,
        }
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(id_value(self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "industry" => Some(FieldValue::text(&self.industry)),
            "size" => Some(FieldValue::Enum(self.size.as_str().into())),
            "email" => Some(FieldValue::text(&self.email)),
            "appliedDate" => Some(FieldValue::Date(self.applied_date)),
            "status" => Some(FieldValue::Enum(self.status.as_str().into())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Option<()> {
        match name {
            "name" => self.name = take_text(value)?,
            "industry" => self.industry = take_text(value)?,
            "size" => self.size = take_enum(value, CompanySize::parse)?,
            "email" => self.email = take_text(value)?,
            "appliedDate" => self.applied_date = take_date(value)?,
            "status" => self.status = take_enum(value, CompanyStatus::parse)?,
            _ => return None,
        }
        Some(())
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
}
