use super::{deserialize_id, id_value, take_date, take_enum, take_text, today};
use crate::error::{FieldIssue, ValidationErrors};
use crate::fields::{FieldKind, FieldSpec, FieldValue, ListConfig};
use crate::record::{Record, RecordId};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

closed_set! {
    pub enum CycleStatus {
        Upcoming => "Upcoming",
        Active => "Active",
        Closed => "Closed",
    }
}

/// An internship cycle (e.g., "Summer 2025") with its date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: CycleStatus,
}

pub static CYCLE_CONFIG: ListConfig = ListConfig {
    family: "cycles",
    status_field: "status",
    fields: &[
        FieldSpec::new("id", "ID", FieldKind::Int)
            .sortable()
            .read_only(),
        FieldSpec::new("name", "Name", FieldKind::Text)
            .searchable()
            .sortable()
            .required(),
        FieldSpec::new("startDate", "Start", FieldKind::Date)
            .sortable()
            .required(),
        FieldSpec::new("endDate", "End", FieldKind::Date)
            .sortable()
            .required(),
        FieldSpec::new("status", "Status", FieldKind::Enum)
            .filterable()
            .sortable()
            .required()
            .choices(CycleStatus::LABELS),
    ],
};

impl Record for Cycle {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn config() -> &'static ListConfig {
        &CYCLE_CONFIG
    }

    fn template() -> Self {
        let start = today();
        Self {
            id: 0,
            name: String::new(),
            start_date: start,
            end_date: start.checked_add_months(Months::new(3)).unwrap_or(start),
            status: CycleStatus::Upcoming,
        }
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(id_value(self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "startDate" => Some(FieldValue::Date(self.start_date)),
            "endDate" => Some(FieldValue::Date(self.end_date)),
            "status" => Some(FieldValue::Enum(self.status.as_str().into())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Option<()> {
        match name {
            "name" => self.name = take_text(value)?,
            "startDate" => self.start_date = take_date(value)?,
            "endDate" => self.end_date = take_date(value)?,
            "status" => self.status = take_enum(value, CycleStatus::parse)?,
            _ => return None,
        }
        Some(())
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn check_update(&self, next: &Self) -> Result<(), ValidationErrors> {
        if next.end_date <= next.start_date {
            return Err(ValidationErrors::single(FieldIssue::invalid(
                "endDate",
                "must be after startDate",
            )));
        }
        Ok(())
    }
}
