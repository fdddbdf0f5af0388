use std::{borrow::Cow, fs::File, io::Read, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::{
    library::Library,
    traits::{Field, RawRow},
};

/// One row of a Goodreads library export. The column names are fixed by
/// Goodreads; missing columns deserialize to `None`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GoodreadsRow {
    #[serde(rename = "Book Id")]
    pub book_id:                    Option<String>,
    #[serde(rename = "Title")]
    pub title:                      Option<String>,
    #[serde(rename = "Author")]
    pub author:                     Option<String>,
    #[serde(rename = "Author l-f")]
    pub author_lf:                  Option<String>,
    #[serde(rename = "Additional Authors")]
    pub additional_authors:         Option<String>,
    #[serde(rename = "ISBN")]
    pub isbn:                       Option<String>,
    #[serde(rename = "ISBN13")]
    pub isbn13:                     Option<String>,
    #[serde(rename = "My Rating")]
    pub my_rating:                  Option<String>,
    #[serde(rename = "Average Rating")]
    pub average_rating:             Option<String>,
    #[serde(rename = "Publisher")]
    pub publisher:                  Option<String>,
    #[serde(rename = "Binding")]
    pub binding:                    Option<String>,
    #[serde(rename = "Number of Pages")]
    pub number_of_pages:            Option<String>,
    #[serde(rename = "Year Published")]
    pub year_published:             Option<String>,
    #[serde(rename = "Original Publication Year")]
    pub original_publication_year:  Option<String>,
    #[serde(rename = "Date Read")]
    pub date_read:                  Option<String>,
    #[serde(rename = "Date Added")]
    pub date_added:                 Option<String>,
    #[serde(rename = "Bookshelves")]
    pub bookshelves:                Option<String>,
    #[serde(rename = "Bookshelves with positions")]
    pub bookshelves_with_positions: Option<String>,
    #[serde(rename = "Exclusive Shelf")]
    pub exclusive_shelf:            Option<String>,
    #[serde(rename = "My Review")]
    pub my_review:                  Option<String>,
    #[serde(rename = "Spoiler")]
    pub spoiler:                    Option<String>,
    #[serde(rename = "Private Notes")]
    pub private_notes:              Option<String>,
    #[serde(rename = "Read Count")]
    pub read_count:                 Option<String>,
    #[serde(rename = "Owned Copies")]
    pub owned_copies:               Option<String>,
}

impl RawRow for GoodreadsRow {
    fn get_raw(&self, field: Field) -> Option<Cow<'_, str>> {
        let value = match field {
            Field::BookId => &self.book_id,
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::AuthorLf => &self.author_lf,
            Field::AdditionalAuthors => &self.additional_authors,
            Field::Isbn => &self.isbn,
            Field::Isbn13 => &self.isbn13,
            Field::MyRating => &self.my_rating,
            Field::AverageRating => &self.average_rating,
            Field::Publisher => &self.publisher,
            Field::Binding => &self.binding,
            Field::NumPages => &self.number_of_pages,
            Field::YearPublished => &self.year_published,
            Field::OriginalPublicationYear => &self.original_publication_year,
            Field::DateRead => &self.date_read,
            Field::DateAdded => &self.date_added,
            Field::Bookshelves => &self.bookshelves,
            Field::BookshelvesWithPositions => &self.bookshelves_with_positions,
            Field::ExclusiveShelf => &self.exclusive_shelf,
            Field::MyReview => &self.my_review,
            Field::Spoiler => &self.spoiler,
            Field::PrivateNotes => &self.private_notes,
            Field::ReadCount => &self.read_count,
            Field::OwnedCopies => &self.owned_copies,
            // Goodreads keeps series in the title and reading state in the dates.
            Field::Series | Field::SeriesIndex | Field::Read | Field::Archived => return None,
        };
        value.as_deref().map(Cow::Borrowed)
    }
}

/// Reads every row of an export. Short rows are kept; a row that is not CSV
/// at all fails the whole load.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<GoodreadsRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (i, row) in rdr.deserialize::<GoodreadsRow>().enumerate() {
        rows.push(row.with_context(|| format!("Malformed export row {}", i + 1))?);
    }
    Ok(rows)
}

pub fn load_reader<R: Read>(reader: R) -> Result<Library> {
    let rows = read_rows(reader)?;
    let library = Library::from_rows(&rows);
    info!("Loaded {} books from Goodreads export.", library.len());
    Ok(library)
}

pub fn load_path(path: &Path) -> Result<Library> {
    let file = File::open(path)
        .with_context(|| format!("Couldn't open Goodreads export {}", path.display()))?;
    load_reader(file)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_columns_are_none() {
        let rows = read_rows("Title,Author\nDune,Frank Herbert\n".as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![GoodreadsRow {
                title: Some("Dune".into()),
                author: Some("Frank Herbert".into()),
                ..GoodreadsRow::default()
            }]
        );
    }

    #[test]
    fn short_rows_survive() {
        let rows = read_rows("Title,Author,Date Read\nDune\n".as_bytes()).unwrap();
        assert_eq!(rows[0].title.as_deref(), Some("Dune"));
        assert_eq!(rows[0].date_read, None);
    }

    #[test]
    fn series_fields_are_never_explicit() {
        let row = GoodreadsRow {
            title: Some("Dune (Dune, #1)".into()),
            ..GoodreadsRow::default()
        };
        assert!(!row.has_series_fields());
        assert_eq!(row.get_raw(Field::Series), None);
    }
}
