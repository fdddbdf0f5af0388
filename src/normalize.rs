//! Turns source rows into [`BookRecord`]s.
//!
//! Normalization never fails. Missing keys, malformed numbers and unknown
//! date layouts all end up as absent fields on an otherwise complete record.

use tracing::trace;

use crate::{
    series,
    traits::{Field, RawRow},
    types::{book::BookRecord, isbn, series::SeriesTag, shelf},
};

pub const MAX_RATING: u8 = 5;

pub fn normalize<R: RawRow + ?Sized>(row: &R) -> BookRecord {
    let title = row.get_string(Field::Title);
    let (series, series_index) = match series_of(row, &title) {
        Some(SeriesTag { name, index }) => (Some(name), index),
        None => (None, None),
    };
    BookRecord {
        book_id: row.get_optional_string(Field::BookId),
        author: row.get_string(Field::Author),
        author_lf: row.get_string(Field::AuthorLf),
        additional_authors: row.get_string(Field::AdditionalAuthors),
        isbn: isbn::clean(&row.get_string(Field::Isbn)),
        isbn13: isbn::clean(&row.get_string(Field::Isbn13)),
        publisher: row.get_string(Field::Publisher),
        binding: row.get_string(Field::Binding),
        num_pages: row.get_optional_u32(Field::NumPages),
        year_published: year(row, Field::YearPublished),
        original_publication_year: year(row, Field::OriginalPublicationYear),
        date_read: row.get_optional_date(Field::DateRead),
        date_added: row.get_optional_date(Field::DateAdded),
        read_count: row.get_optional_u32(Field::ReadCount),
        my_rating: rating(row),
        average_rating: row.get_optional_float(Field::AverageRating),
        bookshelves: shelf::parse(&row.get_string(Field::Bookshelves)),
        bookshelves_with_positions: row.get_string(Field::BookshelvesWithPositions),
        exclusive_shelf: row.get_string(Field::ExclusiveShelf),
        my_review: row.get_string(Field::MyReview),
        spoiler: row.get_string(Field::Spoiler),
        private_notes: row.get_string(Field::PrivateNotes),
        owned_copies: row.get_optional_u32(Field::OwnedCopies),
        read: row.get_flag(Field::Read),
        archived: row.get_flag(Field::Archived),
        series,
        series_index,
        title,
    }
}

/// Explicit series columns win; otherwise the title is searched.
fn series_of<R: RawRow + ?Sized>(row: &R, title: &str) -> Option<SeriesTag> {
    if row.has_series_fields() {
        let name = row.get_optional_string(Field::Series)?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(SeriesTag {
            name: name.to_string(),
            index: row.get_optional_float(Field::SeriesIndex),
        })
    } else {
        series::from_title(title)
    }
}

fn year<R: RawRow + ?Sized>(row: &R, field: Field) -> Option<i32> {
    row.get_optional_int(field)
        .and_then(|x| i32::try_from(x).ok())
}

fn rating<R: RawRow + ?Sized>(row: &R) -> Option<u8> {
    let value = row.get_optional_int(Field::MyRating)?;
    match u8::try_from(value) {
        Ok(x) if x <= MAX_RATING => Some(x),
        _ => {
            trace!("rating {value} outside 0..={MAX_RATING}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, collections::HashMap};

    use pretty_assertions::assert_eq;

    use super::*;

    struct Row {
        fields:   HashMap<Field, String>,
        explicit: bool,
    }

    impl RawRow for Row {
        fn get_raw(&self, field: Field) -> Option<Cow<'_, str>> {
            self.fields.get(&field).map(|x| Cow::Borrowed(x.as_str()))
        }

        fn has_series_fields(&self) -> bool {
            self.explicit
        }
    }

    fn row(explicit: bool, pairs: &[(Field, &str)]) -> Row {
        Row {
            fields: pairs
                .iter()
                .map(|(k, v)| (*k, v.to_string()))
                .collect(),
            explicit,
        }
    }

    #[test]
    fn empty_row_is_a_blank_record() {
        assert_eq!(normalize(&row(false, &[])), BookRecord::default());
    }

    #[test]
    fn malformed_fields_become_absent() {
        let book = normalize(&row(false, &[
            (Field::Title, "Dune (Dune, #1)"),
            (Field::NumPages, "n/a"),
            (Field::YearPublished, "1965.5"),
            (Field::DateRead, "2020-01-01"),
            (Field::MyRating, "7"),
            (Field::AverageRating, "four"),
        ]));
        assert_eq!(book.num_pages, None);
        assert_eq!(book.year_published, None);
        assert_eq!(book.date_read, None);
        assert_eq!(book.my_rating, None);
        assert_eq!(book.average_rating, None);
        assert_eq!(book.series.as_deref(), Some("Dune"));
        assert_eq!(book.series_index, Some(1.0));
    }

    #[test]
    fn zero_rating_is_kept() {
        let book = normalize(&row(false, &[(Field::MyRating, "0")]));
        assert_eq!(book.my_rating, Some(0));
    }

    #[test]
    fn explicit_series_skip_title_parsing() {
        let book = normalize(&row(true, &[
            (Field::Title, "Dune (Dune, #1)"),
            (Field::Series, "Dune Chronicles"),
            (Field::SeriesIndex, "1.0"),
        ]));
        assert_eq!(book.series.as_deref(), Some("Dune Chronicles"));
        assert_eq!(book.series_index, Some(1.0));

        let standalone = normalize(&row(true, &[
            (Field::Title, "Dune (Dune, #1)"),
            (Field::Series, ""),
            (Field::SeriesIndex, "1.0"),
        ]));
        assert_eq!(standalone.series, None);
        assert_eq!(standalone.series_index, None);

        let blank = normalize(&row(true, &[
            (Field::Series, "   "),
            (Field::SeriesIndex, "2"),
        ]));
        assert_eq!(blank.series, None);
        assert_eq!(blank.series_index, None);
    }

    #[test]
    fn blank_title_series_is_no_series() {
        let book = normalize(&row(false, &[(Field::Title, "Untitled ( , #1)")]));
        assert_eq!(book.series, None);
        assert_eq!(book.series_index, None);
    }

    #[test]
    fn isbns_are_cleaned() {
        let book = normalize(&row(false, &[
            (Field::Isbn, "=\"0441172717\""),
            (Field::Isbn13, "=\"9780441172719\""),
        ]));
        assert_eq!(book.isbn, "0441172717");
        assert_eq!(book.isbn13, "9780441172719");
    }
}
