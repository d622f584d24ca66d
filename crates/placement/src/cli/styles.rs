//! Terminal styles.
//!
//! Rendering code asks for a style by what the text *is* (a heading, a
//! status, a muted hint) and never picks colors itself.

use console::Style;
use placementapp::notify::Severity;

pub fn heading() -> Style {
    Style::new().bold()
}

pub fn muted() -> Style {
    Style::new().color256(246)
}

pub fn id() -> Style {
    Style::new().yellow()
}

pub fn severity(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::new().cyan(),
        Severity::Success => Style::new().green(),
        Severity::Warning => Style::new().yellow(),
        Severity::Error => Style::new().red().bold(),
    }
}

/// Color for a status label. Unknown labels stay unstyled.
pub fn status(label: &str) -> Style {
    match label {
        "Accepted" | "Active" | "Current" | "Live" | "On Internship" => Style::new().green(),
        "Pending" | "Upcoming" | "Draft" => Style::new().yellow(),
        "Rejected" | "Flagged" => Style::new().red(),
        "Closed" | "Completed" | "Finalized" | "Graduated" => Style::new().color256(246),
        _ => Style::new(),
    }
}
