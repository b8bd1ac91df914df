/// Derived views over alert collections.
///
/// Submodules:
/// - `aggregate` — filter, polygon/zone split, county colors, state tallies.
/// - `histogram` — event-type counts for the hazard filter bar.
/// - `badges`    — per-state badge summaries built from the state tallies.
/// - `ordered`   — insertion-ordered map backing the derived views.

pub mod aggregate;
pub mod badges;
pub mod histogram;
pub mod ordered;
