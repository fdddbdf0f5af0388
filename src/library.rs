use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};

use crate::{
    analyzer,
    normalize::{self, MAX_RATING},
    traits::RawRow,
    types::{book::BookRecord, series::SeriesSummary},
};

/// Series name to its members, each group in series order.
pub type SeriesGroups<'a> = BTreeMap<&'a str, Vec<&'a BookRecord>>;

/// Every record of one analysis run, in the order the source produced them.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Library {
    books: Vec<BookRecord>,
}

impl Library {
    pub fn new(books: Vec<BookRecord>) -> Self {
        Self { books }
    }

    pub fn from_rows<'r, R, I>(rows: I) -> Self
    where
        R: RawRow + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        Self::new(rows.into_iter().map(|row| normalize::normalize(row)).collect())
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&BookRecord>
    where
        P: Fn(&BookRecord) -> bool,
    {
        self.books.iter().filter(|x| predicate(*x)).collect()
    }

    /// Non-archived books that belong to a series, grouped by series name.
    pub fn group_by_series(&self) -> SeriesGroups<'_> {
        let mut groups: SeriesGroups = BTreeMap::new();
        for book in self.books.iter().filter(|x| !x.archived) {
            if let Some(series) = &book.series {
                groups.entry(series.as_str()).or_default().push(book);
            }
        }
        for members in groups.values_mut() {
            sort_in_series(members);
        }
        groups
    }

    /// All members of one series, archived ones included.
    pub fn series_books(&self, name: &str) -> Vec<&BookRecord> {
        let mut books = self.filter(|x| x.series.as_deref() == Some(name));
        sort_in_series(&mut books);
        books
    }

    pub fn incomplete_series(&self) -> Vec<SeriesSummary<'_>> {
        analyzer::analyze(self.group_by_series())
    }

    /// Read books, most recently read first when `sort_by_date` is set.
    pub fn read_books(&self, limit: Option<usize>, sort_by_date: bool) -> Vec<&BookRecord> {
        let mut books = self.filter(BookRecord::is_read);
        if sort_by_date {
            return newest_first(books, limit);
        }
        if let Some(limit) = limit {
            books.truncate(limit);
        }
        books
    }

    pub fn tbr_books(&self) -> Vec<&BookRecord> {
        self.filter(BookRecord::is_tbr)
    }

    pub fn currently_reading(&self) -> Vec<&BookRecord> {
        self.filter(BookRecord::is_currently_reading)
    }

    pub fn books_by_shelf(&self, name: &str) -> Vec<&BookRecord> {
        self.filter(|x| x.has_shelf(name))
    }

    pub fn read_in_period(&self, days: u32, today: NaiveDate) -> Vec<&BookRecord> {
        let cutoff = cutoff(days, today);
        self.filter(|x| x.date_read.map_or(false, |d| d >= cutoff))
    }

    pub fn added_in_period(&self, days: u32, today: NaiveDate) -> Vec<&BookRecord> {
        let cutoff = cutoff(days, today);
        self.filter(|x| x.date_added.map_or(false, |d| d >= cutoff))
    }

    pub fn read_in_year(&self, year: i32) -> Vec<&BookRecord> {
        self.filter(|x| x.date_read.map_or(false, |d| d.year() == year))
    }

    /// Authors by number of books read, most read first.
    pub fn author_stats(&self) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for book in self.books.iter().filter(|x| x.is_read()) {
            *counts.entry(book.author.as_str()).or_default() += 1;
        }
        let mut stats = counts.into_iter().collect::<Vec<_>>();
        stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        stats
    }

    /// How often each star rating from 1 to 5 was given to a read book.
    pub fn rating_distribution(&self) -> BTreeMap<u8, usize> {
        let mut dist = (1..=MAX_RATING).map(|x| (x, 0)).collect::<BTreeMap<_, _>>();
        for book in self.books.iter().filter(|x| x.is_read()) {
            if let Some(rating) = book.my_rating.filter(|x| *x > 0) {
                *dist.entry(rating).or_default() += 1;
            }
        }
        dist
    }
}

/// Most recently read first, keeping at most `limit` books.
pub fn newest_first(mut books: Vec<&BookRecord>, limit: Option<usize>) -> Vec<&BookRecord> {
    // Undated reads go last; None < Some(_) so the reversed compare does it.
    books.sort_by(|a, b| b.date_read.cmp(&a.date_read));
    if let Some(limit) = limit {
        books.truncate(limit);
    }
    books
}

/// Ascending series position; `sort_by` is stable so ties keep load order.
fn sort_in_series(books: &mut [&BookRecord]) {
    books.sort_by(|a, b| a.series_position().total_cmp(&b.series_position()));
}

fn cutoff(days: u32, today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}
