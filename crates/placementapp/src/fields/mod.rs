//! # Field System
//!
//! Every record family (applications, posts, reports, ...) exposes its fields
//! through one generic abstraction instead of per-page ad-hoc code:
//!
//! - **Values**: [`FieldValue`] is the runtime representation of any field.
//! - **Specifications**: [`FieldSpec`] says what kind of value a field holds and
//!   whether it is searchable, filterable, sortable, required or read-only.
//! - **Configuration**: [`ListConfig`] is the per-family table of specs that
//!   instantiates the generic list view for one record type.
//! - **Coercion**: raw strings (form inputs, query parameters, CLI flags) are
//!   turned into typed values in exactly one place, [`FieldSpec::coerce_input`]
//!   and [`FieldSpec::coerce_filter`].
//!
//! ## Field Kinds
//!
//! | Kind | Examples | Raw form |
//! |------|----------|----------|
//! | `Text` | `studentName`, `jobTitle` | as typed |
//! | `Int` | `id`, `postId`, `capacity` | `42` |
//! | `Float` | `gpa` | `3.4` |
//! | `Bool` | `paid` | `true` / `yes` / `1` |
//! | `Date` | `appliedDate` | `2025-05-10` |
//! | `Enum` | `status`, `size` | one of the declared choices, any case |
//! | `List` | `skills`, `tags` | comma separated |

mod spec;
mod value;

pub use spec::{FieldKind, FieldSpec, ListConfig};
pub use value::FieldValue;

/// Raw, untyped form input keyed by field name.
pub type FormValues = std::collections::BTreeMap<String, String>;

/// Typed partial update keyed by field name.
///
/// `None` clears an optional field.
pub type FieldPatch = std::collections::BTreeMap<String, Option<FieldValue>>;
