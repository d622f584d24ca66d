//! # Placement Architecture
//!
//! Placement is the **UI-agnostic core** of an internship-management back
//! office. Every list page of the office (applications, internship posts,
//! interns, report reviews, companies, students, workshops, cycles) is the
//! same generic list view instantiated with a different record family.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/placement)                                     │
//! │  - Parses arguments, renders tables, terminal I/O           │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Controller (controller.rs)                                 │
//! │  - One ListController per page, generic over the record     │
//! │  - Session, Notifier and DataSource are injected            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View, Modal, Review (view/, modal.rs, review.rs)           │
//! │  - Pure filtering, sorting, pagination, form validation     │
//! │  - The report review state machine                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/)                                             │
//! │  - RecordStore: ordered, whole-record replacement           │
//! │  - DataSource: MockDataSource, JsonFileSource               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout or stderr. Logging goes through
//! `tracing`; installing a subscriber is the binary's job. User-facing
//! messages go through the injected [`notify::Notifier`].
//!
//! ## Per-Family Configuration
//!
//! A family plugs into the generic view by implementing [`record::Record`]
//! and providing a [`fields::ListConfig`] table that says which fields are
//! searchable, filterable, sortable, required and read-only. See
//! [`records`] for the eight families.
//!
//! ## Module Overview
//!
//! - [`controller`]: the list view controller
//! - [`store`]: record store and data sources
//! - [`view`]: predicate set, comparator, derived view, pagination
//! - [`modal`]: create/edit form with all-fields validation
//! - [`review`]: report review state machine and reason prompt
//! - [`export`]: status summaries and CSV export
//! - [`config`]: layered configuration
//! - [`error`]: the error taxonomy

pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod fields;
pub mod modal;
pub mod notify;
pub mod record;
pub mod records;
pub mod review;
pub mod session;
pub mod store;
pub mod view;

pub use controller::{ListController, LoadOutcome, LoadTicket, ReviewOutcome};
pub use error::{PlacementError, Result};
pub use record::{Record, RecordId};
