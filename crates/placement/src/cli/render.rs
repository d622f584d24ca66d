//! # Rendering Module
//!
//! Plain-text rendering of list pages, single records, summaries and field
//! tables. Layout (column widths, truncation, padding) is computed on the
//! unstyled text with `unicode-width`, and styles are applied afterwards so
//! escape codes never skew the alignment. `console` drops the styling when
//! the output is not a terminal.

use super::styles;
use console::{Style, Term};
use placementapp::export::StatusSummary;
use placementapp::fields::{FieldKind, FieldSpec, ListConfig};
use placementapp::notify::{Notice, Notifier};
use placementapp::view::Page;
use placementapp::Record;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a table cell may get before it is truncated.
pub const MAX_CELL_WIDTH: usize = 28;
pub const COLUMN_GAP: &str = "  ";
const ELLIPSIS: char = '…';
const EMPTY_CELL: &str = "-";

/// Truncate `text` to at most `max` display columns, ending in an ellipsis
/// when something was cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let room = max - 1;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > room {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

fn pad_to_width(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn cell<R: Record>(record: &R, spec: &FieldSpec) -> String {
    record
        .get_field(spec.name)
        .map(|value| value.to_form_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

fn cell_style(spec: &FieldSpec, config: &ListConfig, text: &str) -> Style {
    if spec.name == config.status_field {
        styles::status(text)
    } else if spec.name == "id" {
        styles::id()
    } else if text == EMPTY_CELL {
        styles::muted()
    } else {
        Style::new()
    }
}

/// One page of a list as an aligned table, followed by a page footer.
pub fn render_page<R: Record>(page: &Page<'_, R>) -> String {
    let config = R::config();
    if page.total == 0 {
        return format!("{}\n", styles::muted().apply_to(format!("No {} match.", config.family)));
    }

    let columns: Vec<&FieldSpec> = config.fields.iter().collect();
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|spec| truncate_to_width(&cell(*record, spec), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(spec.label.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(spec, width)| {
            styles::heading()
                .apply_to(pad_to_width(spec.label, *width))
                .to_string()
        })
        .collect();
    out.push_str(header.join(COLUMN_GAP).trim_end());
    out.push('\n');

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(columns.iter().zip(&widths))
            .map(|(text, (spec, width))| {
                cell_style(spec, config, text)
                    .apply_to(pad_to_width(text, *width))
                    .to_string()
            })
            .collect();
        out.push_str(cells.join(COLUMN_GAP).trim_end());
        out.push('\n');
    }

    let record_word = if page.total == 1 { "record" } else { "records" };
    out.push_str(
        &styles::muted()
            .apply_to(format!(
                "Page {} of {} ({} {record_word})",
                page.page, page.page_count, page.total
            ))
            .to_string(),
    );
    out.push('\n');
    out
}

/// Every field of one record, one per line.
pub fn render_record<R: Record>(record: &R) -> String {
    let config = R::config();
    let label_width = config
        .fields
        .iter()
        .map(|spec| spec.label.width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for spec in config.fields {
        let text = cell(record, spec);
        out.push_str(&format!(
            "{}  {}\n",
            styles::heading().apply_to(pad_to_width(&format!("{}:", spec.label), label_width + 1)),
            cell_style(spec, config, &text).apply_to(&text)
        ));
    }
    out
}

/// Status counts, in the family's declared status order.
pub fn render_summary(summary: &StatusSummary) -> String {
    let width = summary
        .counts
        .iter()
        .map(|entry| entry.status.width())
        .chain(std::iter::once("Total".width()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{}\n", styles::heading().apply_to(&summary.family));
    for entry in &summary.counts {
        out.push_str(&format!(
            "  {}  {:>4}\n",
            styles::status(&entry.status).apply_to(pad_to_width(&entry.status, width)),
            entry.count
        ));
    }
    out.push_str(&format!(
        "  {}  {:>4}\n",
        styles::heading().apply_to(pad_to_width("Total", width)),
        summary.total
    ));
    out
}

fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Int => "int",
        FieldKind::Float => "float",
        FieldKind::Bool => "bool",
        FieldKind::Date => "date",
        FieldKind::Enum => "enum",
        FieldKind::List => "list",
    }
}

fn flags(spec: &FieldSpec) -> String {
    let mut flags = Vec::new();
    if spec.searchable {
        flags.push("search");
    }
    if spec.filterable {
        flags.push("filter");
    }
    if spec.sortable {
        flags.push("sort");
    }
    if spec.required {
        flags.push("required");
    }
    if spec.read_only {
        flags.push("read-only");
    }
    flags.join(",")
}

/// The field table of a family: what each field holds and which list
/// operations it takes part in.
pub fn render_fields(config: &ListConfig) -> String {
    let name_width = config.fields.iter().map(|s| s.name.width()).max().unwrap_or(0);
    let flag_texts: Vec<String> = config.fields.iter().map(flags).collect();
    let flag_width = flag_texts.iter().map(|f| f.width()).max().unwrap_or(0);

    let mut out = format!("{}\n", styles::heading().apply_to(config.family));
    for (spec, flag_text) in config.fields.iter().zip(&flag_texts) {
        let mut line = format!(
            "  {}  {:<5}  {}",
            pad_to_width(spec.name, name_width),
            kind_name(spec.kind),
            pad_to_width(flag_text, flag_width)
        );
        if !spec.choices.is_empty() {
            line.push_str(&format!("  {}", styles::muted().apply_to(spec.choices.join(" | "))));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    let style = styles::severity(notice.severity).for_stderr();
    style.apply_to(&notice.message).to_string()
}

/// Writes notices to stderr, keeping stdout for command output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        // A closed stderr leaves nobody to tell.
        let _ = Term::stderr().write_line(&render_notice(&notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placementapp::export::summarize;
    use placementapp::records::{demo, Application, Report};
    use placementapp::view::{paginate, PageRequest};

    fn plain(text: &str) -> String {
        console::strip_ansi_codes(text).into_owned()
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Instabug", 20), "Instabug");
        assert_eq!(truncate_to_width("Frontend Developer Intern", 10), "Frontend …");
        assert_eq!(truncate_to_width("Frontend Developer Intern", 10).width(), 10);
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_characters() {
        let text = "日本語のテキスト";
        let cut = truncate_to_width(text, 7);
        assert!(cut.width() <= 7);
        assert!(cut.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_render_page_aligns_columns() {
        let apps = demo::applications();
        let page = paginate(apps.iter().collect(), PageRequest::new(1, 10));
        let output = plain(&render_page(&page));
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("Student"));
        assert!(lines[1].contains("Ahmed Hassan"));
        let column = lines[0].find("Student").unwrap();
        assert_eq!(lines[1].find("Ahmed Hassan"), Some(column));
        assert_eq!(lines.last().copied(), Some("Page 1 of 1 (4 records)"));
    }

    #[test]
    fn test_render_empty_page() {
        let none: Vec<Application> = Vec::new();
        let page = paginate(none.iter().collect(), PageRequest::new(1, 10));
        assert_eq!(plain(&render_page(&page)), "No applications match.\n");
    }

    #[test]
    fn test_render_record_shows_missing_values_as_dash() {
        let reports = demo::reports();
        let output = plain(&render_record::<Report>(&reports[0]));
        assert!(output.contains("Title:"));
        let reason = output.lines().find(|l| l.starts_with("Reason:")).unwrap();
        assert!(reason.trim_end().ends_with(EMPTY_CELL));
    }

    #[test]
    fn test_render_summary_lists_total() {
        let output = plain(&render_summary(&summarize(&demo::reports())));
        assert!(output.starts_with("reports\n"));
        assert!(output.contains("Flagged"));
        assert!(output.lines().last().unwrap().trim().starts_with("Total"));
        assert!(output.lines().last().unwrap().trim_end().ends_with('3'));
    }

    #[test]
    fn test_render_fields_shows_flags_and_choices() {
        let output = plain(&render_fields(Report::config()));
        let status = output.lines().find(|l| l.trim_start().starts_with("status")).unwrap();
        assert!(status.contains("enum"));
        assert!(status.contains("read-only"));
        assert!(status.contains("Pending | Accepted | Flagged | Rejected"));
    }
}
