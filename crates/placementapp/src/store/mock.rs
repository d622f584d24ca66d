use super::source::DataSource;
use crate::error::{PlacementError, Result};
use crate::record::{Record, RecordId};
use std::cell::RefCell;
use std::time::Duration;
use tracing::debug;

/// In-memory data source standing in for a backend.
///
/// Every call waits for the configured latency first. Uses `RefCell` since
/// the controller is single-threaded.
pub struct MockDataSource<R: Record> {
    records: RefCell<Vec<R>>,
    latency: Duration,
    simulate_failure: RefCell<bool>,
}

impl<R: Record> Default for MockDataSource<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R: Record> MockDataSource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: RefCell::new(records),
            latency: Duration::ZERO,
            simulate_failure: RefCell::new(false),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every following call fail with a transport error.
    pub fn set_simulate_failure(&self, simulate: bool) {
        *self.simulate_failure.borrow_mut() = simulate;
    }

    /// What the "backend" currently holds.
    pub fn snapshot(&self) -> Vec<R> {
        self.records.borrow().clone()
    }

    fn round_trip(&self, operation: &str) -> Result<()> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        if *self.simulate_failure.borrow() {
            debug!(operation, "simulated transport failure");
            return Err(PlacementError::Transport(format!(
                "simulated network failure during {operation}"
            )));
        }
        Ok(())
    }
}

impl<R: Record> DataSource<R> for MockDataSource<R> {
    fn fetch_all(&self) -> Result<Vec<R>> {
        self.round_trip("fetch")?;
        Ok(self.records.borrow().clone())
    }

    fn save(&self, record: &R) -> Result<()> {
        self.round_trip("save")?;
        let mut records = self.records.borrow_mut();
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    fn remove(&self, id: RecordId) -> Result<()> {
        self.round_trip("remove")?;
        self.records.borrow_mut().retain(|r| r.id() != id);
        Ok(())
    }
}
