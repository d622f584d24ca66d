//! # Record Families
//!
//! One struct per list page of the internship office, each implementing
//! [`Record`](crate::record::Record) together with its [`ListConfig`](crate::fields::ListConfig):
//!
//! | Family | Struct | Status set |
//! |--------|--------|------------|
//! | `applications` | [`Application`] | Pending, Accepted, Rejected, Finalized |
//! | `posts` | [`InternshipPost`] | Active, Closed, Draft |
//! | `interns` | [`Intern`] | Current, Completed |
//! | `reports` | [`Report`] | Pending, Accepted, Flagged, Rejected |
//! | `companies` | [`Company`] | Pending, Accepted, Rejected |
//! | `students` | [`Student`] | Active, On Internship, Graduated |
//! | `workshops` | [`Workshop`] | Upcoming, Live, Completed |
//! | `cycles` | [`Cycle`] | Upcoming, Active, Closed |
//!
//! Field names on the wire (JSON data files) are the camelCase names used by
//! the configuration tables, so `--filter studentName=...` and the JSON key
//! are the same string.

use crate::fields::FieldValue;
use crate::record::{RecordId, MAX_RECORD_ID};
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};

/// Declares a closed status-like enum with canonical labels.
///
/// Generates `ALL`, `LABELS`, `as_str`, `parse` (case-insensitive), `Display`,
/// a `Default` of the first variant, and serde using the labels.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str().eq_ignore_ascii_case(raw))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use closed_set;

mod application;
mod company;
mod cycle;
pub mod demo;
mod intern;
mod post;
mod report;
mod student;
mod workshop;

pub use application::{Application, ApplicationStatus};
pub use company::{Company, CompanySize, CompanyStatus};
pub use cycle::{Cycle, CycleStatus};
pub use intern::{Intern, InternStatus};
pub use post::{InternshipPost, PostStatus};
pub use report::Report;
pub use student::{Student, StudentStatus};
pub use workshop::{Workshop, WorkshopStatus};

// --- set_field helpers ---
//
// Each returns `None` when the value is absent or has the wrong type, which
// `set_field` passes straight through.

pub(crate) fn take_text(value: Option<FieldValue>) -> Option<String> {
    match value? {
        FieldValue::Text(s) | FieldValue::Enum(s) => Some(s),
        _ => None,
    }
}

pub(crate) fn take_int(value: Option<FieldValue>) -> Option<i64> {
    value?.as_int()
}

pub(crate) fn take_id(value: Option<FieldValue>) -> Option<u64> {
    u64::try_from(take_int(value)?).ok()
}

pub(crate) fn take_float(value: Option<FieldValue>) -> Option<f64> {
    value?.as_float()
}

pub(crate) fn take_bool(value: Option<FieldValue>) -> Option<bool> {
    value?.as_bool()
}

pub(crate) fn take_date(value: Option<FieldValue>) -> Option<NaiveDate> {
    value?.as_date()
}

pub(crate) fn take_list(value: Option<FieldValue>) -> Option<Vec<String>> {
    match value? {
        FieldValue::List(items) => Some(items),
        _ => None,
    }
}

pub(crate) fn take_enum<T>(value: Option<FieldValue>, parse: fn(&str) -> Option<T>) -> Option<T> {
    parse(&take_text(value)?)
}

/// Wraps a taker for an optional field: `None` clears it.
pub(crate) fn take_optional<T>(
    value: Option<FieldValue>,
    take: fn(Option<FieldValue>) -> Option<T>,
) -> Option<Option<T>> {
    match value {
        None => Some(None),
        some => take(some).map(Some),
    }
}

// Ids above MAX_RECORD_ID are refused when records are read and when ids
// are assigned, so the fallback is never taken.
pub(crate) fn id_value(id: RecordId) -> FieldValue {
    FieldValue::Int(i64::try_from(id).unwrap_or(i64::MAX))
}

/// Reads an id, refusing anything above [`MAX_RECORD_ID`].
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    let id = RecordId::deserialize(deserializer)?;
    if id > MAX_RECORD_ID {
        return Err(de::Error::custom(format!(
            "id {id} is out of range (at most {MAX_RECORD_ID})"
        )));
    }
    Ok(id)
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
