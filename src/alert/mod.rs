/// Alert classification primitives.
///
/// Submodules:
/// - `severity` — CAP severity ranking, worst-of reduction, color tokens.
/// - `geocode`  — SAME code parsing into state and county FIPS codes.

pub mod geocode;
pub mod severity;
