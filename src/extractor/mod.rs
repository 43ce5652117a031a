pub mod heading_extractor;

pub use heading_extractor::{
    collect_levels, extract_from_document, extract_headings, extract_live_headings, level_counts,
};
