use std::borrow::Cow;

use chrono::NaiveDate;
use tracing::trace;

use crate::types::date;

/// Every field a source row may carry, independent of how the source names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BookId,
    Title,
    Author,
    AuthorLf,
    AdditionalAuthors,
    Isbn,
    Isbn13,
    MyRating,
    AverageRating,
    Publisher,
    Binding,
    NumPages,
    YearPublished,
    OriginalPublicationYear,
    DateRead,
    DateAdded,
    Bookshelves,
    BookshelvesWithPositions,
    ExclusiveShelf,
    MyReview,
    Spoiler,
    PrivateNotes,
    ReadCount,
    OwnedCopies,
    Series,
    SeriesIndex,
    Read,
    Archived,
}

/// A loosely typed source row.
///
/// Adapters only implement [`RawRow::get_raw`]; the typed accessors never fail
/// and fall back to an absent value (or an empty string / `false`) whenever the
/// raw text is missing or does not parse.
pub trait RawRow {
    /// The raw text of `field`, `None` when the row does not carry it.
    fn get_raw(&self, field: Field) -> Option<Cow<'_, str>>;

    /// Whether the source states series membership explicitly. When it does
    /// not, the series is recovered from the title.
    fn has_series_fields(&self) -> bool {
        false
    }

    /// The exact text a boolean field must hold to count as true.
    fn true_token(&self) -> &str {
        "true"
    }

    fn get_string(&self, field: Field) -> String {
        self.get_raw(field)
            .map(|x| x.into_owned())
            .unwrap_or_default()
    }

    fn get_optional_string(&self, field: Field) -> Option<String> {
        self.get_raw(field)
            .filter(|x| !x.is_empty())
            .map(|x| x.into_owned())
    }

    fn get_optional_int(&self, field: Field) -> Option<i64> {
        parse_or_absent(self, field)
    }

    fn get_optional_u32(&self, field: Field) -> Option<u32> {
        parse_or_absent(self, field)
    }

    fn get_optional_float(&self, field: Field) -> Option<f64> {
        parse_or_absent(self, field)
    }

    fn get_optional_date(&self, field: Field) -> Option<NaiveDate> {
        let raw = self.get_raw(field)?;
        let parsed = date::parse(&raw);
        if parsed.is_none() && !raw.is_empty() {
            trace!("{field:?}: {raw:?} is not a YYYY/MM/DD date");
        }
        parsed
    }

    fn get_flag(&self, field: Field) -> bool {
        match self.get_raw(field) {
            Some(raw) => raw == self.true_token(),
            None => false,
        }
    }
}

fn parse_or_absent<R, T>(row: &R, field: Field) -> Option<T>
where
    R: RawRow + ?Sized,
    T: std::str::FromStr,
{
    let raw = row.get_raw(field)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            trace!("{field:?}: {raw:?} is not a number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapRow(HashMap<Field, &'static str>);

    impl RawRow for MapRow {
        fn get_raw(&self, field: Field) -> Option<Cow<'_, str>> {
            self.0.get(&field).map(|x| Cow::Borrowed(*x))
        }
    }

    fn row(pairs: &[(Field, &'static str)]) -> MapRow {
        MapRow(pairs.iter().copied().collect())
    }

    #[test]
    fn missing_fields_fall_back() {
        let r = row(&[]);
        assert_eq!(r.get_string(Field::Title), "");
        assert_eq!(r.get_optional_string(Field::Title), None);
        assert_eq!(r.get_optional_int(Field::NumPages), None);
        assert_eq!(r.get_optional_date(Field::DateRead), None);
        assert!(!r.get_flag(Field::Archived));
    }

    #[test]
    fn malformed_numbers_are_absent_not_zero() {
        let r = row(&[
            (Field::NumPages, "three hundred"),
            (Field::AverageRating, "4,5"),
            (Field::ReadCount, "-1"),
            (Field::YearPublished, ""),
        ]);
        assert_eq!(r.get_optional_u32(Field::NumPages), None);
        assert_eq!(r.get_optional_float(Field::AverageRating), None);
        assert_eq!(r.get_optional_u32(Field::ReadCount), None);
        assert_eq!(r.get_optional_int(Field::YearPublished), None);
    }

    #[test]
    fn numbers_tolerate_surrounding_whitespace() {
        let r = row(&[(Field::NumPages, " 320 "), (Field::AverageRating, "3.87")]);
        assert_eq!(r.get_optional_u32(Field::NumPages), Some(320));
        assert_eq!(r.get_optional_float(Field::AverageRating), Some(3.87));
    }

    #[test]
    fn flags_need_the_exact_token() {
        let r = row(&[
            (Field::Read, "true"),
            (Field::Archived, "True"),
            (Field::Spoiler, "yes"),
        ]);
        assert!(r.get_flag(Field::Read));
        assert!(!r.get_flag(Field::Archived));
        assert!(!r.get_flag(Field::Spoiler));
    }
}
