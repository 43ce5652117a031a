use crate::domain::models::HeadingRecord;
use crate::error::Result;

pub mod csv_repository;

pub use csv_repository::CsvRepository;

/// Destination for the extracted records of one run.
pub trait HeadingRepository {
    fn save(&self, records: &[HeadingRecord]) -> Result<()>;
}
