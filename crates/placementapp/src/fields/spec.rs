//! Field specifications and per-family configuration tables.
//!
//! This module defines the schema for record fields: what kind of value they
//! hold and which list-view behaviors (search, filter, sort, required) apply.

use super::FieldValue;
use chrono::NaiveDate;

/// The kind of value a field holds.
///
/// Determines how raw strings are coerced and how values compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int,
    Float,
    Bool,
    Date,
    /// Closed set of values, listed in [`FieldSpec::choices`]
    Enum,
    /// Comma separated list of strings
    List,
}

/// Specification for a single field of a record family.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// The field name used in filters, sort keys and forms (e.g., "studentName")
    pub name: &'static str,

    /// Column heading for tables
    pub label: &'static str,

    /// The kind of value this field holds
    pub kind: FieldKind,

    /// Whether free-text search looks at this field
    pub searchable: bool,

    /// Whether this field accepts a field filter
    pub filterable: bool,

    /// Whether this field can be the active sort key
    pub sortable: bool,

    /// Whether a form must supply a non-blank value
    pub required: bool,

    /// Whether forms may not change this field (e.g., `id`)
    pub read_only: bool,

    /// Accepted values for `Enum` fields, in display order
    pub choices: &'static [&'static str],
}

impl FieldSpec {
    /// Create a new field spec with default flags (all false).
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            searchable: false,
            filterable: false,
            sortable: false,
            required: false,
            read_only: false,
            choices: &[],
        }
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    /// Coerce raw form input into a typed value.
    ///
    /// Blank input yields `Ok(None)`; whether that is acceptable depends on
    /// [`FieldSpec::required`] and is decided by the caller.
    pub fn coerce_input(&self, raw: &str) -> Result<Option<FieldValue>, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let value = match self.kind {
            FieldKind::Text => FieldValue::Text(trimmed.to_string()),
            FieldKind::Int => trimmed
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| "expected a whole number".to_string())?,
            FieldKind::Float => match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => FieldValue::Float(v),
                _ => return Err("expected a number".to_string()),
            },
            FieldKind::Bool => FieldValue::Bool(parse_bool(trimmed)?),
            FieldKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(FieldValue::Date)
                .map_err(|_| "expected a date (YYYY-MM-DD)".to_string())?,
            FieldKind::Enum => FieldValue::Enum(self.canonical_choice(trimmed)?),
            FieldKind::List => FieldValue::List(
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        };
        Ok(Some(value))
    }

    /// Coerce a raw filter value (query parameter, dropdown selection) to the
    /// field's type so it can be compared with record values.
    ///
    /// For list fields the filter names a single element to look for.
    /// Returns `None` when the value cannot be coerced; such a filter matches
    /// no record.
    pub fn coerce_filter(&self, raw: &str) -> Option<FieldValue> {
        match self.kind {
            FieldKind::List => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| FieldValue::Text(trimmed.to_string()))
            }
            _ => self.coerce_input(raw).ok().flatten(),
        }
    }

    fn canonical_choice(&self, raw: &str) -> Result<String, String> {
        if self.choices.is_empty() {
            return Ok(raw.to_string());
        }
        self.choices
            .iter()
            .find(|choice| choice.eq_ignore_ascii_case(raw))
            .map(|choice| choice.to_string())
            .ok_or_else(|| format!("expected one of: {}", self.choices.join(", ")))
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}

/// Per-family configuration of the generic list view.
///
/// Adding a field to a list page means adding an entry to its table.
#[derive(Debug)]
pub struct ListConfig {
    /// Family name, also the key of the family in JSON data files (e.g., "applications")
    pub family: &'static str,

    /// Field that holds the record's status
    pub status_field: &'static str,

    pub fields: &'static [FieldSpec],
}

impl ListConfig {
    /// Look up a field spec by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn searchable(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|spec| spec.searchable)
    }

    pub fn filterable(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|spec| spec.filterable)
    }

    pub fn sortable(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|spec| spec.sortable)
    }

    pub fn required(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|spec| spec.required)
    }

    /// Fields a form may write.
    pub fn editable(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|spec| !spec.read_only)
    }

    /// Declared status values, in display order.
    pub fn status_choices(&self) -> &'static [&'static str] {
        self.field(self.status_field)
            .map(|spec| spec.choices)
            .unwrap_or(&[])
    }
}
