use std::{collections::BTreeMap, fmt::Write};

use chrono::NaiveDate;
use chrono_humanize::HumanTime;

use crate::{
    config::Config,
    types::{
        book::BookRecord,
        series::{SeriesIndex, SeriesSummary},
    },
};

const UNKNOWN: &str = "Unknown";

fn or_unknown(s: &str) -> &str {
    if s.is_empty() {
        UNKNOWN
    } else {
        s
    }
}

fn heading(out: &mut String, text: &str, config: &Config) {
    let _ = writeln!(out, "{}\n", config.output_heading.format(text));
}

/// The unfinished series report with the next book to pick up for each.
pub fn unfinished_series(summaries: &[SeriesSummary], config: &Config) -> String {
    let mut out = String::new();
    heading(&mut out, "UNFINISHED SERIES", config);
    let _ = writeln!(
        out,
        "You have {} incomplete series:\n",
        config.output_count.format(summaries.len())
    );
    for (i, summary) in summaries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} {}",
            i + 1,
            config.output_series.format(summary.series_name),
            config
                .output_progress
                .format(format!("{}/{}", summary.read_count, summary.total_count))
        );
        match summary.next_unread {
            Some(book) => {
                let index = SeriesIndex(book.series_position());
                let _ = writeln!(
                    out,
                    "   Next: {} {} {}\n",
                    config.output_book.format(or_unknown(&book.title)),
                    config.output_author.format(or_unknown(&book.author)),
                    config.output_part_index.format(index)
                );
            }
            None => {
                let _ = writeln!(out, "   Next: Unable to determine\n");
            }
        }
    }
    out
}

/// A numbered list of books, with read dates relative to `today`.
pub fn book_list(title: &str, books: &[&BookRecord], today: NaiveDate, config: &Config) -> String {
    let mut out = String::new();
    heading(&mut out, title, config);
    if books.is_empty() {
        let _ = writeln!(out, "No books.");
        return out;
    }
    for (i, book) in books.iter().enumerate() {
        let mut line = format!("{}. {}", i + 1, config.output_book.format(or_unknown(&book.title)));
        if !book.author.is_empty() {
            let _ = write!(line, " {}", config.output_author.format(&book.author));
        }
        if let Some(index) = book.series_index {
            let _ = write!(line, " {}", config.output_part_index.format(SeriesIndex(index)));
        }
        if let Some(date) = book.date_read {
            let ago = HumanTime::from(date.signed_duration_since(today));
            let _ = write!(line, ", {}", config.output_date_read.format(ago));
        }
        if let Some(rating) = book.my_rating.filter(|x| *x > 0) {
            let _ = write!(line, ", {}", config.output_rating.format(rating));
        }
        if let Some(isbn) = book.isbn13_hyphenated() {
            let _ = write!(line, ", {}", config.output_isbn.format(isbn));
        }
        let _ = writeln!(out, "{line}");
    }
    out
}

pub fn author_stats(stats: &[(&str, usize)], config: &Config) -> String {
    let mut out = String::new();
    heading(&mut out, "AUTHORS", config);
    for (i, (author, count)) in stats.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {}: {} read",
            i + 1,
            or_unknown(author),
            config.output_count.format(count)
        );
    }
    out
}

pub fn rating_distribution(dist: &BTreeMap<u8, usize>, config: &Config) -> String {
    let mut out = String::new();
    heading(&mut out, "RATINGS", config);
    for (rating, count) in dist.iter().rev() {
        let stars = "*".repeat(usize::from(*rating));
        let _ = writeln!(out, "{stars:<5} {}", config.output_count.format(count));
    }
    out
}
