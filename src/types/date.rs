use chrono::NaiveDate;

/// The only date layout the export uses.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Parses a `YYYY/MM/DD` date. Anything else, including the empty string, is
/// absent; no other layouts are guessed.
pub fn parse(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_separated_dates_parse() {
        assert_eq!(parse("2023/01/15"), NaiveDate::from_ymd_opt(2023, 1, 15));
    }

    #[test]
    fn other_layouts_are_absent() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("2023-01-15"), None);
        assert_eq!(parse("15/01/2023"), None);
        assert_eq!(parse("Jan 15, 2023"), None);
        assert_eq!(parse("2023/02/30"), None);
        assert_eq!(parse("2023/01/15 10:00"), None);
    }
}
