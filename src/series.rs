//! Series recovery from titles such as `Foundation (Foundation, #1)`.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::series::SeriesTag;

/// `(<name without commas>, #<digits and dots>)` at the very end of a title.
static SERIES_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^,]+),\s*#([0-9.]+)\)$").unwrap());

/// Derives the series a title announces in its trailing parenthesized group.
///
/// The name is trimmed. An index that does not parse as a number (`#1.2.3`)
/// leaves the index absent but still yields the name. Titles without the
/// suffix, or with a blank name in it, belong to no series.
pub fn from_title(title: &str) -> Option<SeriesTag> {
    let caps = SERIES_SUFFIX.captures(title)?;
    let name = caps[1].trim();
    if name.is_empty() {
        return None;
    }
    let index = caps[2].parse::<f64>().ok();
    Some(SeriesTag {
        name: name.to_string(),
        index,
    })
}
