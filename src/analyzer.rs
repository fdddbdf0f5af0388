//! Completion analysis over series groups.

use tracing::debug;

use crate::types::{
    book::BookRecord,
    series::{SeriesState, SeriesSummary},
};

/// Summaries of every in-progress series, ordered by series name.
///
/// Each group is expected in series order (see
/// [`Library::group_by_series`](crate::library::Library::group_by_series)).
/// Archived members are ignored, so they neither count toward the total nor
/// get picked as the next book. Complete and unstarted series are left out.
pub fn analyze<'a, I>(groups: I) -> Vec<SeriesSummary<'a>>
where
    I: IntoIterator<Item = (&'a str, Vec<&'a BookRecord>)>,
{
    let mut summaries = groups
        .into_iter()
        .filter_map(|(name, members)| summarize(name, &members))
        .collect::<Vec<_>>();
    summaries.sort_by(|a, b| a.series_name.cmp(b.series_name));
    summaries
}

fn summarize<'a>(name: &'a str, members: &[&'a BookRecord]) -> Option<SeriesSummary<'a>> {
    let active = members
        .iter()
        .copied()
        .filter(|x| !x.archived)
        .collect::<Vec<_>>();
    let total_count = active.len();
    let read_count = active.iter().filter(|x| x.is_read()).count();
    let state = SeriesState::classify(read_count, total_count);
    debug!("{name}: {read_count}/{total_count} read, {state:?}");
    if state != SeriesState::InProgress {
        return None;
    }
    Some(SeriesSummary {
        series_name: name,
        read_count,
        total_count,
        next_unread: active.into_iter().find(|x| !x.is_read()),
    })
}
