/// Event-type histogram for the hazard filter bar.
///
/// Counts alerts per `event` name and sorts descending by count. The sort is
/// stable, so events with equal counts keep the order in which they were
/// first seen in the collection.

use serde::{Deserialize, Serialize};

use crate::analysis::ordered::OrderedMap;
use crate::model::AlertFeature;

/// One histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeCount {
    pub event: String,
    pub count: usize,
}

/// Builds the histogram over `features`, which callers pass unfiltered.
pub fn event_type_histogram<'a, I>(features: I) -> Vec<EventTypeCount>
where
    I: IntoIterator<Item = &'a AlertFeature>,
{
    let mut counts: OrderedMap<usize> = OrderedMap::new();
    for feature in features {
        *counts.entry_or_insert_with(feature.event(), || 0) += 1;
    }

    let mut histogram: Vec<EventTypeCount> = counts
        .into_entries()
        .into_iter()
        .map(|(event, count)| EventTypeCount { event, count })
        .collect();

    // sort_by is stable
    histogram.sort_by(|a, b| b.count.cmp(&a.count));
    histogram
}
