/// Integration tests for the alert service request path
///
/// These drive the public API end to end with in-process sources standing in
/// for the NWS and county boundary upstreams:
/// 1. Live feed caching and upstream failure handling through the HTTP router
/// 2. Summary views (county colors, state tallies, badges, histogram)
/// 3. Historical presets loaded from a config file on disk
/// 4. County boundary reference data
///
/// Run with: cargo test --test alert_service

use std::fs;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use hazmon_service::cache::{AlertCache, ReferenceDataCache};
use hazmon_service::config::parse_config;
use hazmon_service::endpoint::{route, AppState, FETCHED_AT_HEADER};
use hazmon_service::ingest::counties::parse_county_boundaries;
use hazmon_service::ingest::nws::parse_alert_collection;
use hazmon_service::ingest::presets::PresetRegistry;
use hazmon_service::ingest::{AlertSource, CountyBoundaries, FetchError, ReferenceSource};
use hazmon_service::model::AlertCollection;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const LIVE_ALERTS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "id": "urn:oid:live.1",
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-95.5, 29.7], [-95.2, 29.7], [-95.2, 29.9], [-95.5, 29.7]]]
            },
            "properties": {
                "event": "Tornado Warning",
                "severity": "Extreme",
                "urgency": "Immediate",
                "areaDesc": "Harris, TX",
                "geocode": { "SAME": ["048201"], "UGC": ["TXC201"] }
            }
        },
        {
            "id": "urn:oid:live.2",
            "type": "Feature",
            "geometry": null,
            "properties": {
                "event": "Flood Watch",
                "severity": "Moderate",
                "urgency": "Expected",
                "areaDesc": "Harris; Fort Bend",
                "geocode": { "SAME": ["048201", "048157"], "UGC": ["TXZ213", "TXZ227"] }
            }
        },
        {
            "id": "urn:oid:live.3",
            "type": "Feature",
            "geometry": null,
            "properties": {
                "event": "Flood Watch",
                "severity": "Severe",
                "urgency": "Expected",
                "areaDesc": "Caddo",
                "geocode": { "SAME": ["022017", "bad"], "UGC": ["LAZ001"] }
            }
        },
        {
            "id": "urn:oid:live.4",
            "type": "Feature",
            "geometry": null,
            "properties": {
                "event": null,
                "severity": "Catastrophic",
                "areaDesc": "Somewhere"
            }
        }
    ]
}"#;

const PRESET_ALERTS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "id": "urn:oid:ian.1",
            "geometry": null,
            "properties": {
                "event": "Hurricane Warning",
                "severity": "Extreme",
                "urgency": "Immediate",
                "areaDesc": "Lee; Charlotte",
                "geocode": { "SAME": ["012071", "012015"] }
            }
        },
        {
            "id": "urn:oid:ian.2",
            "geometry": null,
            "properties": {
                "event": "Storm Surge Warning",
                "severity": "Extreme",
                "urgency": "Immediate",
                "areaDesc": "Lee",
                "geocode": { "SAME": ["012071"] }
            }
        }
    ]
}"#;

const COUNTIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "id": "48201",
            "properties": { "NAME": "Harris" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-95.9, 29.5], [-94.9, 29.5], [-94.9, 30.2], [-95.9, 29.5]]]
            }
        }
    ]
}"#;

/// Serves `LIVE_ALERTS` until `failing` is set. Counts calls.
struct LiveFeed {
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl AlertSource for LiveFeed {
    fn name(&self) -> &str {
        "live-feed"
    }

    fn fetch_alerts(&self) -> Result<AlertCollection, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Http(503));
        }
        parse_alert_collection(LIVE_ALERTS)
    }
}

struct CountyFile {
    calls: Arc<AtomicUsize>,
}

impl ReferenceSource for CountyFile {
    fn name(&self) -> &str {
        "county-file"
    }

    fn fetch_reference(&self) -> Result<CountyBoundaries, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        parse_county_boundaries(COUNTIES)
    }
}

struct Harness {
    state: AppState,
    alert_calls: Arc<AtomicUsize>,
    county_calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

fn harness(failing: bool, presets: PresetRegistry) -> Harness {
    let alert_calls = Arc::new(AtomicUsize::new(0));
    let county_calls = Arc::new(AtomicUsize::new(0));
    let failing = Arc::new(AtomicBool::new(failing));

    let state = AppState {
        alerts: AlertCache::new(Box::new(LiveFeed {
            calls: Arc::clone(&alert_calls),
            failing: Arc::clone(&failing),
        })),
        counties: ReferenceDataCache::new(Box::new(CountyFile {
            calls: Arc::clone(&county_calls),
        })),
        presets,
    };

    Harness {
        state,
        alert_calls,
        county_calls,
        failing,
    }
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("response body should be JSON")
}

// ---------------------------------------------------------------------------
// 1. Live feed through the cache
// ---------------------------------------------------------------------------

#[test]
fn test_live_feed_is_cached_between_requests() {
    let h = harness(false, PresetRegistry::new());

    let first = route(&h.state, "/api/alerts");
    let second = route(&h.state, "/api/alerts");
    let types = route(&h.state, "/api/alerts/types");

    assert_eq!(first.status, 200);
    assert_eq!(first.body, second.body);
    assert_eq!(types.status, 200);
    assert_eq!(h.alert_calls.load(Ordering::SeqCst), 1, "one upstream fetch within the TTL");
    assert!(first.header(FETCHED_AT_HEADER).is_some());
}

#[test]
fn test_cached_copy_served_while_upstream_fails_within_ttl() {
    let h = harness(false, PresetRegistry::new());
    let warm = route(&h.state, "/api/alerts");
    h.failing.store(true, Ordering::SeqCst);

    // Still inside the TTL, so no refetch and no error.
    let again = route(&h.state, "/api/alerts");
    assert_eq!(again.status, 200);
    assert_eq!(again.body, warm.body);
    assert_eq!(again.header(FETCHED_AT_HEADER), warm.header(FETCHED_AT_HEADER));
}

#[test]
fn test_cold_upstream_failure() {
    let h = harness(true, PresetRegistry::new());

    let alerts = route(&h.state, "/api/alerts");
    assert_eq!(alerts.status, 502);
    assert!(json(&alerts.body)["details"].as_str().unwrap().contains("503"));

    let types = route(&h.state, "/api/alerts/types");
    assert_eq!(types.status, 200);
    assert_eq!(json(&types.body), serde_json::json!([]));

    let summary = route(&h.state, "/api/alerts/summary");
    assert_eq!(summary.status, 502);
}

// ---------------------------------------------------------------------------
// 2. Summary views
// ---------------------------------------------------------------------------

#[test]
fn test_live_summary_views() {
    let h = harness(false, PresetRegistry::new());
    let summary = json(&route(&h.state, "/api/alerts/summary").body);

    assert_eq!(summary["total_count"], 4);
    assert_eq!(summary["polygon_count"], 1);
    assert_eq!(summary["zone_count"], 3);

    // Zone alerts color counties; first writer wins, malformed codes skipped.
    let colors = summary["county_colors"].as_object().unwrap();
    assert_eq!(colors.len(), 3);
    assert_eq!(colors["48201"], "#f9a825");
    assert_eq!(colors["22017"], "#e65100");

    // Unknown event and severity are normalized, not dropped.
    let events: Vec<(&str, u64)> = summary["event_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| (e["event"].as_str().unwrap(), e["count"].as_u64().unwrap()))
        .collect();
    assert_eq!(events, vec![("Flood Watch", 2), ("Tornado Warning", 1), ("Unknown", 1)]);
}

#[test]
fn test_summary_type_filter_narrows_views_but_not_histogram() {
    let h = harness(false, PresetRegistry::new());
    let summary = json(&route(&h.state, "/api/alerts/summary?type=Tornado+Warning").body);

    assert_eq!(summary["filtered_count"], 1);
    assert_eq!(summary["polygon_count"], 1);
    assert_eq!(summary["zone_count"], 0);
    assert!(summary["county_colors"].as_object().unwrap().is_empty());
    assert_eq!(summary["event_types"].as_array().unwrap().len(), 3);
}

#[test]
fn test_summary_filter_matching_nothing_is_empty_not_error() {
    let h = harness(false, PresetRegistry::new());
    let response = route(&h.state, "/api/alerts/summary?type=Blizzard%20Warning");
    assert_eq!(response.status, 200);

    let summary = json(&response.body);
    assert_eq!(summary["filtered_count"], 0);
    assert!(summary["state_badges"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// 3. Historical presets
// ---------------------------------------------------------------------------

#[test]
fn test_presets_loaded_from_config_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("ian.json"), PRESET_ALERTS).unwrap();

    let config = parse_config(
        r#"
        [[preset]]
        name = "ian"
        path = "ian.json"
        "#,
    )
    .unwrap();
    let presets = PresetRegistry::load(&config.presets, dir.path()).expect("preset should load");
    let h = harness(true, presets);

    let historical = route(&h.state, "/api/alerts/historical");
    assert_eq!(historical.status, 200);
    assert_eq!(json(&historical.body)["features"].as_array().unwrap().len(), 2);

    let summary = json(&route(&h.state, "/api/alerts/summary?preset=ian").body);
    assert_eq!(summary["states"]["12"]["count"], 2);
    assert_eq!(summary["state_badges"][0]["state"], "12");
    assert_eq!(summary["state_badges"][0]["size_px"], 28);
    assert_eq!(summary["county_colors"]["12015"], "#d32f2f");

    assert_eq!(h.alert_calls.load(Ordering::SeqCst), 0, "presets never touch the live feed");

    let missing = route(&h.state, "/api/alerts/historical?preset=michael");
    assert_eq!(missing.status, 404);
}

#[test]
fn test_missing_preset_file_fails_startup() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = parse_config(
        r#"
        [[preset]]
        name = "ian"
        path = "nope.json"
        "#,
    )
    .unwrap();

    assert!(PresetRegistry::load(&config.presets, dir.path()).is_err());
}

// ---------------------------------------------------------------------------
// 4. County boundaries
// ---------------------------------------------------------------------------

#[test]
fn test_counties_loaded_once() {
    let h = harness(false, PresetRegistry::new());

    for _ in 0..3 {
        let response = route(&h.state, "/api/counties");
        assert_eq!(response.status, 200);
        let body = json(&response.body);
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"][0]["id"], "48201");
    }

    assert_eq!(h.county_calls.load(Ordering::SeqCst), 1);
}
