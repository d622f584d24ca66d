use clap::{Parser, Subcommand, ValueEnum};
use placementapp::review::ReviewStatus;
use placementapp::session::Role;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "placement",
    bin_name = "placement",
    version,
    disable_help_subcommand = true,
    after_help = "Without --data the built-in demo records are used and nothing is saved."
)]
#[command(about = "Browse and manage internship office records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON data file holding every record family
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Name recorded as the acting user
    #[arg(long, global = true, default_value = "SCAD Office", help_heading = "Options")]
    pub user: String,

    /// Role of the acting user
    #[arg(
        long,
        global = true,
        default_value = "scad-office",
        value_parser = parse_role,
        help_heading = "Options"
    )]
    pub role: Role,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// The list pages of the office.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Family {
    Applications,
    Posts,
    Interns,
    Reports,
    Companies,
    Students,
    Workshops,
    Cycles,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReviewAction {
    Accept,
    Flag,
    Reject,
}

impl ReviewAction {
    pub fn target(self) -> ReviewStatus {
        match self {
            ReviewAction::Accept => ReviewStatus::Accepted,
            ReviewAction::Flag => ReviewStatus::Flagged,
            ReviewAction::Reject => ReviewStatus::Rejected,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List records, filtered, sorted and paged
    #[command(alias = "ls")]
    List {
        family: Family,

        /// Case-insensitive text to look for in searchable fields
        #[arg(short, long)]
        search: Option<String>,

        /// Field filter, e.g. status=Pending ("all" clears it)
        #[arg(short, long, value_name = "FIELD=VALUE", value_parser = parse_key_val)]
        filter: Vec<(String, String)>,

        /// Field to sort by
        #[arg(long, value_name = "KEY")]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Show every field of one record
    Show { family: Family, id: u64 },

    /// Create a record from field values
    #[command(alias = "new")]
    Create {
        family: Family,

        /// Field value, e.g. studentName="Laila Samy"
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_key_val)]
        set: Vec<(String, String)>,
    },

    /// Change fields of a record
    Edit {
        family: Family,
        id: u64,

        /// Field value; an empty value clears optional fields
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_key_val)]
        set: Vec<(String, String)>,
    },

    /// Delete a record (missing records are ignored)
    #[command(alias = "rm")]
    Delete { family: Family, id: u64 },

    /// Accept, flag or reject an internship report
    Review {
        id: u64,
        action: ReviewAction,

        /// Why the report is flagged or rejected
        #[arg(long)]
        reason: Option<String>,
    },

    /// Count records per status
    Summary {
        family: Family,

        /// Also export the counts as CSV to this file or directory
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },

    /// Describe the fields of a family
    Fields { family: Family },

    /// Show the effective configuration
    Config {
        /// Print a commented placement.toml instead
        #[arg(long)]
        template: bool,
    },
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).ok_or_else(|| format!("expected one of: {}", Role::LABELS.join(", ")))
}
