use std::collections::BTreeSet;

pub const TO_READ: &str = "to-read";
pub const CURRENTLY_READING: &str = "currently-reading";

/// Splits the comma separated `Bookshelves` column into a set of shelf names.
pub fn parse(s: &str) -> BTreeSet<String> {
    s.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        let shelves = parse("favorites, sci-fi,  to-read");
        assert_eq!(
            shelves.into_iter().collect::<Vec<_>>(),
            vec!["favorites", "sci-fi", "to-read"]
        );
    }

    #[test]
    fn empty_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse(" , ").is_empty());
    }
}
