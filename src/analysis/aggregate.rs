/// Alert aggregation for the map dashboard.
///
/// `aggregate` turns one alert collection into every derived view the map
/// needs in a single pass over the data:
///
/// - the type-filtered feature list, split into polygon and zone-only alerts
/// - county FIPS → color, from zone-only alerts (first alert wins)
/// - state FIPS → {count, severities}, from all filtered alerts, one
///   contribution per alert per state
/// - the event-type histogram, over the *unfiltered* collection
///
/// Aggregation is pure and total. Malformed SAME codes are skipped and
/// unknown severities rank and color as `Unknown`.

use serde::Serialize;
use std::collections::HashSet;

use crate::alert::geocode::{county_code_of, state_code_of, valid_codes};
use crate::alert::severity::{color_of, Severity};
use crate::analysis::histogram::{event_type_histogram, EventTypeCount};
use crate::analysis::ordered::OrderedMap;
use crate::model::{AlertCollection, AlertFeature};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// County FIPS → color token, in first-seen order.
pub type CountyColorMap = OrderedMap<&'static str>;

/// State FIPS → alert tally, in first-seen order.
pub type StateAggregate = OrderedMap<StateAlerts>;

/// Per-state alert tally.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateAlerts {
    pub count: usize,
    pub severities: Vec<Severity>,
}

/// Everything derived from one collection. Borrows features from the input.
#[derive(Debug, Clone)]
pub struct AlertAggregate<'a> {
    pub filtered: Vec<&'a AlertFeature>,
    pub polygon_alerts: Vec<&'a AlertFeature>,
    pub zone_alerts: Vec<&'a AlertFeature>,
    pub county_colors: CountyColorMap,
    pub states: StateAggregate,
    pub event_types: Vec<EventTypeCount>,
    /// Size of the unfiltered collection.
    pub total_count: usize,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Derives the dashboard views from `collection`.
///
/// `type_filter`, when set, keeps only features whose event matches exactly.
/// The histogram and `total_count` always describe the full collection.
pub fn aggregate<'a>(collection: &'a AlertCollection, type_filter: Option<&str>) -> AlertAggregate<'a> {
    let filtered: Vec<&AlertFeature> = collection
        .features
        .iter()
        .filter(|f| type_filter.is_none_or(|t| f.event() == t))
        .collect();

    let (polygon_alerts, zone_alerts): (Vec<&AlertFeature>, Vec<&AlertFeature>) =
        filtered.iter().copied().partition(|f| f.has_geometry());

    let county_colors = county_color_map(&zone_alerts);
    let states = state_aggregate(&filtered);
    let event_types = event_type_histogram(&collection.features);

    AlertAggregate {
        filtered,
        polygon_alerts,
        zone_alerts,
        county_colors,
        states,
        event_types,
        total_count: collection.len(),
    }
}

/// County colors from zone-only alerts. The first alert to touch a county
/// sets its color; later alerts never overwrite it.
pub fn county_color_map(zone_alerts: &[&AlertFeature]) -> CountyColorMap {
    let mut colors = CountyColorMap::new();

    for feature in zone_alerts {
        let color = color_of(feature.severity());
        for same in valid_codes(feature.same_codes()) {
            colors.insert_if_absent(county_code_of(same), color);
        }
    }

    colors
}

/// Per-state counts. Each alert counts once per state no matter how many of
/// its counties fall in that state.
pub fn state_aggregate(features: &[&AlertFeature]) -> StateAggregate {
    let mut states = StateAggregate::new();

    for feature in features {
        let severity = feature.severity();
        let mut seen: HashSet<&str> = HashSet::new();

        for same in valid_codes(feature.same_codes()) {
            let state = state_code_of(same);
            if !seen.insert(state) {
                continue;
            }
            let tally = states.entry_or_insert_with(state, StateAlerts::default);
            tally.count += 1;
            tally.severities.push(severity);
        }
    }

    states
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
