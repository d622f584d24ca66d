//! # CLI Behavior
//!
//! This is **one possible UI client** for placement, not the application
//! itself. Every list page of the office is reachable as a record family:
//!
//! ```text
//! placement list applications --filter status=Pending --sort appliedDate --desc
//! placement create posts --set jobTitle="QA Intern" --set company=Valeo ...
//! placement review 3 flag --reason "Missing supervisor evaluation"
//! placement summary reports --csv ./out
//! ```
//!
//! ### Demo Records vs. a Data File
//!
//! Without `--data` (or `PLACEMENT_DATA_FILE`) commands run against built-in
//! demo records and nothing is written anywhere. With a data file, every
//! family lives under its own key of one JSON document and writes are saved
//! before they are shown.
//!
//! ### Output
//!
//! Command results go to stdout. Notices (success, errors) and logs go to
//! stderr. Failures exit with status 1.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and per-command handlers
//! - `render`: tables, records, summaries, notices
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
