/// State badge summaries.
///
/// At low zoom the map shows one badge per state instead of county fills.
/// Each badge carries the alert count, the worst severity among that
/// state's alerts, its color, and a pixel size that grows with the count.

use serde::Serialize;

use crate::alert::severity::{color_of, worst_of, Severity};
use crate::analysis::aggregate::StateAggregate;

pub const BADGE_MIN_PX: usize = 28;
pub const BADGE_MAX_PX: usize = 44;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateBadge {
    pub state: String,
    pub count: usize,
    pub worst_severity: Severity,
    pub color: &'static str,
    pub size_px: usize,
}

/// One badge per state, in the aggregate's first-seen order.
pub fn state_badges(states: &StateAggregate) -> Vec<StateBadge> {
    states
        .iter()
        .map(|(state, tally)| {
            let worst = worst_of(tally.severities.iter().copied());
            StateBadge {
                state: state.to_string(),
                count: tally.count,
                worst_severity: worst,
                color: color_of(worst),
                size_px: badge_size_px(tally.count),
            }
        })
        .collect()
}

/// `24 + 2 * count`, clamped to [28, 44].
pub fn badge_size_px(count: usize) -> usize {
    (24 + count.saturating_mul(2)).clamp(BADGE_MIN_PX, BADGE_MAX_PX)
}
