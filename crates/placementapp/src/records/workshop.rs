use super::{
    deserialize_id, id_value, take_date, take_enum, take_int, take_list, take_optional,
    take_text, today,
};
use crate::error::{FieldIssue, ValidationErrors};
use crate::fields::{FieldKind, FieldSpec, FieldValue, ListConfig};
use crate::record::{Record, RecordId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

closed_set! {
    pub enum WorkshopStatus {
        Upcoming => "Upcoming",
        Live => "Live",
        Completed => "Completed",
    }
}

/// A career workshop run by the internship office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub title: String,
    pub speaker: String,
    pub date: NaiveDate,
    /// "HH:MM", 24-hour clock
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: WorkshopStatus,
}

pub static WORKSHOP_CONFIG: ListConfig = ListConfig {
    family: "workshops",
    status_field: "status",
    fields: &[
        FieldSpec::new("id", "ID", FieldKind::Int)
            .sortable()
            .read_only(),
        FieldSpec::new("title", "Title", FieldKind::Text)
            .searchable()
            .sortable()
            .required(),
        FieldSpec::new("speaker", "Speaker", FieldKind::Text)
            .searchable()
            .filterable()
            .sortable()
            .required(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .sortable()
            .required(),
        FieldSpec::new("startTime", "Starts", FieldKind::Text).required(),
        FieldSpec::new("endTime", "Ends", FieldKind::Text).required(),
        FieldSpec::new("capacity", "Capacity", FieldKind::Int).sortable(),
        FieldSpec::new("tags", "Tags", FieldKind::List)
            .searchable()
            .filterable(),
        FieldSpec::new("status", "Status", FieldKind::Enum)
            .filterable()
            .sortable()
            .required()
            .choices(WorkshopStatus::LABELS),
    ],
};

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

impl Record for Workshop {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn config() -> &'static ListConfig {
        &WORKSHOP_CONFIG
    }

    fn template() -> Self {
        Self {
            id: 0,
            title: String::new(),
            speaker: String::new(),
            date: today(),
            start_time: "10:00".into(),
            end_time: "12:00".into(),
            capacity: 30,
            tags: Vec::new(),
            status: WorkshopStatus::Upcoming,
        }
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(id_value(self.id)),
            "title" => Some(FieldValue::text(&self.title)),
            "speaker" => Some(FieldValue::text(&self.speaker)),
            "date" => Some(FieldValue::Date(self.date)),
            "startTime" => Some(FieldValue::text(&self.start_time)),
            "endTime" => Some(FieldValue::text(&self.end_time)),
            "capacity" => Some(FieldValue::Int(self.capacity)),
            "tags" => Some(FieldValue::List(self.tags.clone())),
            "status" => Some(FieldValue::Enum(self.status.as_str().into())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Option<()> {
        match name {
            "title" => self.title = take_text(value)?,
            "speaker" => self.speaker = take_text(value)?,
            "date" => self.date = take_date(value)?,
            "startTime" => self.start_time = take_text(value)?,
            "endTime" => self.end_time = take_text(value)?,
            "capacity" => self.capacity = take_optional(value, take_int)?.unwrap_or(0),
            "tags" => self.tags = take_optional(value, take_list)?.unwrap_or_default(),
            "status" => self.status = take_enum(value, WorkshopStatus::parse)?,
            _ => return None,
        }
        Some(())
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn check_update(&self, next: &Self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let start = parse_time(&next.start_time);
        let end = parse_time(&next.end_time);
        if start.is_none() {
            errors.push(FieldIssue::invalid("startTime", "expected HH:MM"));
        }
        if end.is_none() {
            errors.push(FieldIssue::invalid("endTime", "expected HH:MM"));
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.push(FieldIssue::invalid("endTime", "must be after startTime"));
            }
        }
        if next.capacity < 0 {
            errors.push(FieldIssue::invalid("capacity", "must not be negative"));
        }
        errors.into_result()
    }
}
