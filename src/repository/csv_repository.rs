//! CSV output for heading records.
//!
//! The file is truncated and rewritten in full on every save. The header row
//! is written explicitly so it is present even when there are no records.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::models::HeadingRecord;
use crate::error::{AppError, Result};

use super::HeadingRepository;

pub const HEADER: [&str; 2] = ["tag", "title"];

pub struct CsvRepository {
    path: PathBuf,
}

impl CsvRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HeadingRepository for CsvRepository {
    fn save(&self, records: &[HeadingRecord]) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| AppError::io(&self.path, e))?;
        write_records_to(file, records).map_err(|e| match e {
            AppError::Csv(inner) if inner.is_io_error() => AppError::io(&self.path, inner.into()),
            other => other,
        })?;
        tracing::info!(
            "[CSV] Wrote {} row(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Write header plus one row per record to any writer, then flush.
pub fn write_records_to<W: Write>(writer: W, records: &[HeadingRecord]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(HEADER)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}
