pub mod models;

pub use models::{Document, FetchMode, HeadingLevels, HeadingRecord, LiveHeadings, ScrapeSummary};
