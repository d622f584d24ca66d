use super::source::DataSource;
use crate::error::Result;
use crate::record::{Record, RecordId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Data source backed by one JSON document shared by all families.
///
/// ```json
/// {
///   "applications": [ { "id": 1, "studentName": "Ahmed Hassan", ... } ],
///   "reports": [ ... ]
/// }
/// ```
///
/// A missing file or family reads as empty. Writes replace the file
/// atomically.
pub struct JsonFileSource<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R> JsonFileSource<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: Record + Serialize + DeserializeOwned> JsonFileSource<R> {
    fn load_document(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn load_family(&self, document: &Map<String, Value>) -> Result<Vec<R>> {
        match document.get(R::config().family) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(Vec::new()),
        }
    }

    fn store_family(&self, mut document: Map<String, Value>, records: &[R]) -> Result<()> {
        document.insert(R::config().family.to_string(), serde_json::to_value(records)?);
        let content = serde_json::to_string_pretty(&document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.json".to_string());
        let tmp_path = self
            .path
            .with_file_name(format!(".{}-{}.tmp", file_name, std::process::id()));
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(
            path = %self.path.display(),
            family = R::config().family,
            count = records.len(),
            "wrote data file"
        );
        Ok(())
    }
}

impl<R: Record + Serialize + DeserializeOwned> DataSource<R> for JsonFileSource<R> {
    fn fetch_all(&self) -> Result<Vec<R>> {
        let document = self.load_document()?;
        self.load_family(&document)
    }

    fn save(&self, record: &R) -> Result<()> {
        let document = self.load_document()?;
        let mut records = self.load_family(&document)?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.store_family(document, &records)
    }

    fn remove(&self, id: RecordId) -> Result<()> {
        let document = self.load_document()?;
        let mut records = self.load_family(&document)?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(());
        }
        self.store_family(document, &records)
    }
}
