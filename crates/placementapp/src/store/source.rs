use crate::error::Result;
use crate::record::{Record, RecordId};

/// Where a list page's records come from and where saves go.
///
/// All methods take `&self`; implementations use interior mutability where
/// they need it. The controller only commits a change to its store after the
/// source has accepted it.
pub trait DataSource<R: Record> {
    /// Load every record of the family.
    fn fetch_all(&self) -> Result<Vec<R>>;

    /// Persist one record, inserting or replacing by id.
    fn save(&self, record: &R) -> Result<()>;

    /// Forget one record. Sources without deletion support ignore it.
    fn remove(&self, _id: RecordId) -> Result<()> {
        Ok(())
    }
}

impl<R: Record, S: DataSource<R> + ?Sized> DataSource<R> for Box<S> {
    fn fetch_all(&self) -> Result<Vec<R>> {
        (**self).fetch_all()
    }

    fn save(&self, record: &R) -> Result<()> {
        (**self).save(record)
    }

    fn remove(&self, id: RecordId) -> Result<()> {
        (**self).remove(id)
    }
}
