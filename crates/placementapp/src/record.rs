//! # Records
//!
//! A record is one row of a list page: an application, a post, a report, etc.
//! Every family implements [`Record`], which is all the generic list view
//! needs to search, filter, sort, edit and summarize it.
//!
//! Identity is the numeric `id`. Every other field is mutable through
//! [`Record::set_field`], mirroring how [`Record::get_field`] reads it.

use crate::error::ValidationErrors;
use crate::fields::{FieldValue, ListConfig};
use std::fmt::Debug;

pub type RecordId = u64;

/// Highest id a record may carry. Ids stay within the signed integer range
/// so that `id` filters and sorting see them exactly.
pub const MAX_RECORD_ID: RecordId = i64::MAX as RecordId;

pub trait Record: Clone + Debug {
    /// The record's identity.
    fn id(&self) -> RecordId;

    /// Assign an identity. Used by the store when inserting new records.
    fn set_id(&mut self, id: RecordId);

    /// The configuration table of this family.
    fn config() -> &'static ListConfig;

    /// Field defaults used by create forms.
    fn template() -> Self;

    /// Get a field value by name.
    ///
    /// Returns `None` for unknown names and for absent optional fields.
    fn get_field(&self, name: &str) -> Option<FieldValue>;

    /// Set a field value by name. `None` clears an optional field.
    ///
    /// Returns `None` when the name is unknown, the field is not writable,
    /// or the value has the wrong type for it.
    fn set_field(&mut self, name: &str, value: Option<FieldValue>) -> Option<()>;

    /// The canonical name of the record's current status.
    fn status_label(&self) -> &'static str;

    /// Guard run before a replacement version of this record is committed.
    ///
    /// Families with status workflows refuse illegal transitions here.
    fn check_update(&self, _next: &Self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
