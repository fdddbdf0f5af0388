/// Strips the `="..."` wrapper Goodreads puts around ISBNs so spreadsheets
/// keep them as text. Anything else is returned as given, so cleaning twice
/// is the same as cleaning once.
pub fn clean(isbn: &str) -> String {
    match isbn
        .strip_prefix("=\"")
        .and_then(|x| x.strip_suffix('"'))
    {
        Some(inner) => inner.to_string(),
        None => isbn.to_string(),
    }
}

/// Hyphenated form of a valid ISBN-10 or ISBN-13, `None` otherwise.
pub fn hyphenate(isbn: &str) -> Option<String> {
    let isbn = isbn.parse::<isbn2::Isbn>().ok()?;
    isbn.hyphenate().ok().map(|x| x.to_string())
}
