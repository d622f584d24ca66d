//! Status summaries and their downloadable export.
//!
//! A [`StatusSummary`] counts the records of a family per status, in the
//! order the family declares its statuses. A [`ReportExporter`] turns a
//! summary into an [`ExportBlob`], the bytes a browser would download.

use crate::error::{PlacementError, Result};
use crate::record::Record;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub family: String,
    pub counts: Vec<StatusCount>,
    pub total: usize,
}

impl StatusSummary {
    pub fn count_of(&self, status: &str) -> usize {
        self.counts
            .iter()
            .find(|entry| entry.status == status)
            .map_or(0, |entry| entry.count)
    }
}

/// Count `records` per status. Statuses with no records are listed with 0.
pub fn summarize<'a, R, I>(records: I) -> StatusSummary
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let config = R::config();
    let mut counts: Vec<StatusCount> = config
        .status_choices()
        .iter()
        .map(|status| StatusCount {
            status: status.to_string(),
            count: 0,
        })
        .collect();

    let mut total = 0;
    for record in records {
        total += 1;
        let label = record.status_label();
        match counts.iter_mut().find(|entry| entry.status == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(StatusCount {
                status: label.to_string(),
                count: 1,
            }),
        }
    }

    StatusSummary {
        family: config.family.to_string(),
        counts,
        total,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlob {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportBlob {
    /// Write the blob to `path`, or into `path` under its own filename when
    /// `path` is a directory.
    pub fn write_to(&self, path: &Path) -> Result<std::path::PathBuf> {
        let target = if path.is_dir() {
            path.join(&self.filename)
        } else {
            path.to_path_buf()
        };
        std::fs::write(&target, &self.bytes)?;
        Ok(target)
    }
}

pub trait ReportExporter {
    fn export(&self, summary: &StatusSummary) -> Result<ExportBlob>;
}

/// `Status,Count` rows followed by a `Total` row.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl ReportExporter for CsvExporter {
    fn export(&self, summary: &StatusSummary) -> Result<ExportBlob> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["Status", "Count"])?;
        for entry in &summary.counts {
            let count = entry.count.to_string();
            wtr.write_record([entry.status.as_str(), count.as_str()])?;
        }
        let total = summary.total.to_string();
        wtr.write_record(["Total", total.as_str()])?;

        let bytes = wtr
            .into_inner()
            .map_err(|err| PlacementError::Io(err.into_error()))?;
        Ok(ExportBlob {
            filename: format!("{}-status-summary.csv", summary.family),
            mime: "text/csv",
            bytes,
        })
    }
}
