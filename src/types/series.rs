use std::fmt::Display;

use serde::Serialize;

use crate::types::book::BookRecord;

/// Series membership of one book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesTag {
    pub name:  String,
    pub index: Option<f64>,
}

/// How far a reader got through a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesState {
    Complete,
    Unstarted,
    InProgress,
}

impl SeriesState {
    pub fn classify(read_count: usize, total_count: usize) -> Self {
        if read_count == total_count {
            Self::Complete
        } else if read_count == 0 {
            Self::Unstarted
        } else {
            Self::InProgress
        }
    }
}

/// One in-progress series, borrowing the records it cites from the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary<'a> {
    pub series_name: &'a str,
    pub read_count:  usize,
    pub total_count: usize,
    pub next_unread: Option<&'a BookRecord>,
}

/// A series index the way readers write it: `1`, `2`, `1.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesIndex(pub f64);

impl Display for SeriesIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0.0 && self.0.is_finite() {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(SeriesState::classify(0, 3), SeriesState::Unstarted);
        assert_eq!(SeriesState::classify(3, 3), SeriesState::Complete);
        assert_eq!(SeriesState::classify(1, 3), SeriesState::InProgress);
        assert_eq!(SeriesState::classify(0, 0), SeriesState::Complete);
    }

    #[test]
    fn index_display() {
        assert_eq!(SeriesIndex(1.0).to_string(), "1");
        assert_eq!(SeriesIndex(1.5).to_string(), "1.5");
        assert_eq!(SeriesIndex(0.0).to_string(), "0");
        assert_eq!(SeriesIndex(1e20).to_string(), "100000000000000000000");
    }
}
