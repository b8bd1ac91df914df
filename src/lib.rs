/// hazmon_service: hazard alert aggregation and caching service.
///
/// # Module structure
///
/// ```text
/// hazmon_service
/// ├── model       — shared data types (AlertCollection, AlertFeature, HazmonError, …)
/// ├── config      — service configuration loader (service.toml)
/// ├── logging     — tracing subscriber setup
/// ├── endpoint    — HTTP API over the caches and presets
/// ├── cache
/// │   ├── alerts     — 5-minute TTL cache for the live feed, stale fallback
/// │   └── reference  — load-once cache for county boundaries
/// ├── ingest
/// │   ├── nws       — NWS active alerts API: URL construction + JSON parsing
/// │   ├── counties  — county boundary GeoJSON source
/// │   ├── presets   — historical alert snapshots
/// │   └── fixtures (test only) — representative API response payloads
/// ├── alert
/// │   ├── severity  — severity ranking and map colors
/// │   └── geocode   — SAME code validation and FIPS slicing
/// └── analysis
///     ├── aggregate — filter, partition, county colors, state tallies
///     ├── histogram — event-type counts
///     ├── badges    — per-state badge sizing
///     └── ordered   — insertion-ordered map for JSON output
/// ```

/// Public modules
pub mod alert;
pub mod analysis;
pub mod cache;
pub mod config;
pub mod endpoint;
pub mod ingest;
pub mod logging;
pub mod model;
