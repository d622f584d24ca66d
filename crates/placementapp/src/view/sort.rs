//! Comparator: one active sort key and a direction.

use crate::record::Record;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// The header-click rule: the active key flips direction, any other key
    /// starts ascending.
    pub fn toggle(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(active) if active.key == key => SortState {
                key: active.key.clone(),
                direction: active.direction.flipped(),
            },
            _ => SortState::ascending(key),
        }
    }
}

/// Compare two records on the sort key.
///
/// A record without a value for the key sorts before any record with one.
pub fn compare<R: Record>(a: &R, b: &R, sort: &SortState) -> Ordering {
    let base = match (a.get_field(&sort.key), b.get_field(&sort.key)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.compare(&y),
    };
    match sort.direction {
        SortDirection::Ascending => base,
        SortDirection::Descending => base.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{demo, Student};

    #[test]
    fn toggling_the_active_key_flips_direction() {
        let desc = SortState::descending("appliedDate");
        let next = SortState::toggle(Some(&desc), "appliedDate");
        assert_eq!(next, SortState::ascending("appliedDate"));
        let again = SortState::toggle(Some(&next), "appliedDate");
        assert_eq!(again, desc);
    }

    #[test]
    fn selecting_a_new_key_resets_to_ascending() {
        let desc = SortState::descending("appliedDate");
        assert_eq!(
            SortState::toggle(Some(&desc), "studentName"),
            SortState::ascending("studentName")
        );
        assert_eq!(
            SortState::toggle(None, "studentName"),
            SortState::ascending("studentName")
        );
    }

    #[test]
    fn absent_values_sort_lowest() {
        let students = demo::students();
        let graduated = &students[2];
        let active = &students[0];
        assert!(graduated.gpa.is_none());

        let asc = SortState::ascending("gpa");
        assert_eq!(compare(graduated, active, &asc), Ordering::Less);
        assert_eq!(compare(active, graduated, &asc), Ordering::Greater);
    }

    #[test]
    fn unknown_key_compares_equal() {
        let a = Student::template();
        let b = Student::template();
        assert_eq!(
            compare(&a, &b, &SortState::ascending("nope")),
            Ordering::Equal
        );
    }
}
