use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{isbn, shelf};

/// One catalogued book, normalized from either source.
///
/// Absent numbers and dates are `None`, never zero. A book outside any series
/// has `series: None`, never an empty name.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub book_id:                    Option<String>,
    pub title:                      String,
    pub author:                     String,
    pub author_lf:                  String,
    pub additional_authors:         String,
    pub isbn:                       String,
    pub isbn13:                     String,
    pub publisher:                  String,
    pub binding:                    String,
    pub num_pages:                  Option<u32>,
    pub year_published:             Option<i32>,
    pub original_publication_year:  Option<i32>,
    pub date_read:                  Option<NaiveDate>,
    pub date_added:                 Option<NaiveDate>,
    pub read_count:                 Option<u32>,
    pub my_rating:                  Option<u8>,
    pub average_rating:             Option<f64>,
    pub bookshelves:                BTreeSet<String>,
    pub bookshelves_with_positions: String,
    pub exclusive_shelf:            String,
    pub my_review:                  String,
    pub spoiler:                    String,
    pub private_notes:              String,
    pub owned_copies:               Option<u32>,
    /// Read flag of sources that track reading as a boolean.
    pub read:                       bool,
    pub archived:                   bool,
    pub series:                     Option<String>,
    pub series_index:               Option<f64>,
}

impl BookRecord {
    /// A book counts as read when it has a read date or carries the read flag.
    pub fn is_read(&self) -> bool {
        self.date_read.is_some() || self.read
    }

    pub fn is_tbr(&self) -> bool {
        self.exclusive_shelf == shelf::TO_READ
    }

    pub fn is_currently_reading(&self) -> bool {
        self.exclusive_shelf == shelf::CURRENTLY_READING
    }

    pub fn has_shelf(&self, name: &str) -> bool {
        self.bookshelves.contains(name) || self.exclusive_shelf == name
    }

    /// Position used for ordering within a series; a missing index sorts first.
    pub fn series_position(&self) -> f64 {
        self.series_index.unwrap_or(0.0)
    }

    pub fn isbn13_hyphenated(&self) -> Option<String> {
        isbn::hyphenate(&self.isbn13)
    }
}

impl std::fmt::Display for BookRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.author.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{} by {}", self.title, self.author)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_from_either_signal() {
        let dated = BookRecord {
            date_read: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..BookRecord::default()
        };
        let flagged = BookRecord {
            read: true,
            ..BookRecord::default()
        };
        assert!(dated.is_read());
        assert!(flagged.is_read());
        assert!(!BookRecord::default().is_read());
    }

    #[test]
    fn shelves() {
        let book = BookRecord {
            bookshelves: shelf::parse("favorites, sci-fi"),
            exclusive_shelf: "to-read".into(),
            ..BookRecord::default()
        };
        assert!(book.is_tbr());
        assert!(!book.is_currently_reading());
        assert!(book.has_shelf("sci-fi"));
        assert!(book.has_shelf("to-read"));
        assert!(!book.has_shelf("sci"));
    }
}
