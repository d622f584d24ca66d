//! # Derived View
//!
//! The rows a list page shows are never stored. They are recomputed from the
//! store's records, the [`FilterState`] and the optional [`SortState`]:
//!
//! ```text
//! records ──filter──▶ matches ──stable sort──▶ view ──(paginate)──▶ page
//! ```
//!
//! [`derive_view`] is pure: it borrows the records, returns references into
//! them in a new order, and gives the same result for the same inputs.
//! Sorting is stable, so records that compare equal keep store order.
//! Pagination is a separate last step and never changes which rows match or
//! how they are ordered.

pub mod filter;
pub mod page;
pub mod sort;

pub use filter::{matches, FilterChoice, FilterState};
pub use page::{paginate, Page, PageRequest};
pub use sort::{compare, SortDirection, SortState};

use crate::record::Record;

pub fn derive_view<'a, R: Record>(
    records: &'a [R],
    filter: &FilterState,
    sort: Option<&SortState>,
) -> Vec<&'a R> {
    let mut rows: Vec<&R> = records
        .iter()
        .filter(|record| matches(*record, filter))
        .collect();
    if let Some(sort) = sort {
        rows.sort_by(|a, b| compare(*a, *b, sort));
    }
    rows
}
