//! Domain entities for a scrape run

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

// ====== Records ======

/// One heading element as it lands in the CSV: `tag` is the lower-case
/// element name, `title` its text (raw text content for parsed HTML, visible
/// text for a live DOM).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub tag: String,
    pub title: String,
}

impl HeadingRecord {
    pub fn new(tag: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            title: title.into(),
        }
    }

    /// Heading level parsed back out of the tag (`"h3"` -> 3).
    pub fn level(&self) -> Option<u8> {
        self.tag.strip_prefix('h')?.parse().ok()
    }
}

// ====== Levels ======

/// Inclusive range of heading levels to extract, always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingLevels {
    min: u8,
    max: u8,
}

impl HeadingLevels {
    pub const LOWEST: u8 = 1;
    pub const HIGHEST: u8 = 6;

    pub fn new(min: u8, max: u8) -> Result<Self, AppError> {
        if min < Self::LOWEST || max > Self::HIGHEST {
            return Err(AppError::config(format!(
                "heading levels must be within {}-{}, got {min}-{max}",
                Self::LOWEST,
                Self::HIGHEST
            )));
        }
        if min > max {
            return Err(AppError::config(format!(
                "heading level range {min}-{max} is reversed"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// Levels in ascending order.
    pub fn iter(&self) -> RangeInclusive<u8> {
        self.min..=self.max
    }
}

impl Default for HeadingLevels {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

impl FromStr for HeadingLevels {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            let part = part.trim();
            let digits = part
                .strip_prefix('h')
                .or_else(|| part.strip_prefix('H'))
                .unwrap_or(part);
            digits
                .parse::<u8>()
                .map_err(|_| AppError::config(format!("invalid heading level '{part}'")))
        };

        match s.split_once('-') {
            Some((min, max)) => Self::new(parse(min)?, parse(max)?),
            None => {
                let level = parse(s)?;
                Self::new(level, level)
            }
        }
    }
}

impl fmt::Display for HeadingLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

// ====== Documents ======

/// What acquisition hands to extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// HTML text still to be parsed
    Html(String),
    /// Headings already read out of a live, rendered DOM
    Live(LiveHeadings),
}

impl Document {
    pub fn as_html(&self) -> Option<&str> {
        match self {
            Document::Html(html) => Some(html),
            Document::Live(_) => None,
        }
    }
}

/// Matches per heading level as a browser reported them, each list in
/// document order. Index 0 holds `h1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveHeadings {
    by_level: [Vec<HeadingRecord>; HeadingLevels::HIGHEST as usize],
}

impl LiveHeadings {
    /// Build from per-level lists, `h1` first. Extra lists beyond `h6`
    /// are rejected.
    pub fn from_levels(levels: Vec<Vec<HeadingRecord>>) -> Result<Self, AppError> {
        if levels.len() > HeadingLevels::HIGHEST as usize {
            return Err(AppError::Parse(format!(
                "expected at most {} heading levels, got {}",
                HeadingLevels::HIGHEST,
                levels.len()
            )));
        }
        let mut live = Self::default();
        for (slot, records) in live.by_level.iter_mut().zip(levels) {
            *slot = records;
        }
        Ok(live)
    }

    pub fn level(&self, level: u8) -> &[HeadingRecord] {
        match level {
            HeadingLevels::LOWEST..=HeadingLevels::HIGHEST => &self.by_level[level as usize - 1],
            _ => &[],
        }
    }
}

// ====== Fetch mode ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FetchMode {
    /// Plain HTTP GET, body parsed as HTML
    #[default]
    Static,
    /// Headless browser navigation, headings read from the rendered DOM
    Rendered,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Static => "static",
            FetchMode::Rendered => "rendered",
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ====== Summary ======

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub output: PathBuf,
    pub total: usize,
    /// `(level, count)` for every configured level, ascending
    pub per_level: Vec<(u8, usize)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_levels_are_one_to_five() {
        let levels = HeadingLevels::default();
        assert_eq!(levels.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(levels.to_string(), "1-5");
    }

    #[test]
    fn parses_range_and_single_level() {
        assert_eq!("2-4".parse::<HeadingLevels>().unwrap(), HeadingLevels::new(2, 4).unwrap());
        assert_eq!("h3".parse::<HeadingLevels>().unwrap(), HeadingLevels::new(3, 3).unwrap());
        assert_eq!("h1-h6".parse::<HeadingLevels>().unwrap().max(), 6);
    }

    #[test]
    fn rejects_out_of_range_or_reversed() {
        assert!("0-3".parse::<HeadingLevels>().is_err());
        assert!("1-7".parse::<HeadingLevels>().is_err());
        assert!("4-2".parse::<HeadingLevels>().is_err());
        assert!("x".parse::<HeadingLevels>().is_err());
    }

    #[test]
    fn only_one_h_prefix_allowed() {
        assert!("hh3".parse::<HeadingLevels>().is_err());
        assert!("Hh2".parse::<HeadingLevels>().is_err());
        assert!("h2-hh4".parse::<HeadingLevels>().is_err());
        assert_eq!("H2".parse::<HeadingLevels>().unwrap().min(), 2);
    }

    #[test]
    fn live_headings_by_level() {
        let live = LiveHeadings::from_levels(vec![
            vec![HeadingRecord::new("h1", "Top")],
            vec![],
            vec![HeadingRecord::new("h3", "a"), HeadingRecord::new("h3", "b")],
        ])
        .unwrap();
        assert_eq!(live.level(1), &[HeadingRecord::new("h1", "Top")]);
        assert!(live.level(2).is_empty());
        assert_eq!(live.level(3).len(), 2);
        assert!(live.level(6).is_empty());
        assert!(live.level(0).is_empty());
        assert!(live.level(7).is_empty());

        assert!(LiveHeadings::from_levels(vec![vec![]; 7]).is_err());
    }

    #[test]
    fn record_level_from_tag() {
        assert_eq!(HeadingRecord::new("h2", "A").level(), Some(2));
        assert_eq!(HeadingRecord::new("div", "A").level(), None);
    }
}
