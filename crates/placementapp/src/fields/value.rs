//! Field value types.
//!
//! This module defines the runtime representation of field values and the
//! total order used by the comparator.

use chrono::NaiveDate;
use std::cmp::Ordering;

/// Runtime representation of a field value.
///
/// Absent optional fields are not represented here: `Record::get_field`
/// returns `None` for them.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text (e.g., `studentName`)
    Text(String),

    /// Whole number (e.g., `id`, `postId`)
    Int(i64),

    /// Decimal number (e.g., `gpa`)
    Float(f64),

    /// Flag (e.g., `paid`)
    Bool(bool),

    /// Calendar date (e.g., `appliedDate`)
    Date(NaiveDate),

    /// One value from a closed set, stored in its canonical spelling
    Enum(String),

    /// Open list of strings (e.g., `skills`)
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(v) => Some(v),
            _ => None,
        }
    }

    /// The string a form field shows for this value.
    ///
    /// This is also what text search looks at, and it parses back through
    /// `FieldSpec::coerce_input` to the same value.
    pub fn to_form_string(&self) -> String {
        match self {
            FieldValue::Text(s) | FieldValue::Enum(s) => s.clone(),
            FieldValue::Int(v) => v.to_string(),
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Bool(v) => v.to_string(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::List(items) => items.join(", "),
        }
    }

    /// Whether this record value satisfies a coerced filter value.
    ///
    /// Scalars need exact equality. Lists accept any filter value they contain.
    pub fn satisfies(&self, wanted: &FieldValue) -> bool {
        match (self, wanted) {
            (FieldValue::List(items), FieldValue::List(wanted_items)) => {
                wanted_items.iter().any(|w| items.contains(w))
            }
            (FieldValue::List(items), other) => match other.as_text() {
                Some(w) => items.iter().any(|item| item == w),
                None => false,
            },
            (a, b) => a == b,
        }
    }

    /// Total order over values, used by the comparator.
    ///
    /// Values of the same kind compare naturally (text case-insensitively
    /// first). Values of different kinds order by kind rank.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Int(a), FieldValue::Float(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Float(a), FieldValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b))
            | (FieldValue::Enum(a), FieldValue::Enum(b)) => compare_text(a, b),
            (FieldValue::List(a), FieldValue::List(b)) => compare_text(&a.join(","), &b.join(",")),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Int(_) | FieldValue::Float(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::Enum(_) => 3,
            FieldValue::Text(_) => 4,
            FieldValue::List(_) => 5,
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
