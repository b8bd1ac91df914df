/// HTTP endpoint for the hazard map dashboard
///
/// Serves the live alert feed, the derived views, historical snapshots, and
/// the county boundary dataset to the browser client.
///
/// Endpoints:
/// - GET /api/alerts                    - Live alert FeatureCollection (cached, 5 min TTL)
/// - GET /api/alerts/types              - Event-type histogram over the live feed
/// - GET /api/alerts/historical?preset= - Historical snapshot (default: ian)
/// - GET /api/alerts/summary?type=&preset= - County colors, state badges, histogram
/// - GET /api/counties                  - County boundary GeoJSON (cached forever)
/// - GET /health                        - Service health check
///
/// Requests are handled on a thread pool; all handlers share one `AppState`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use threadpool::ThreadPool;
use tracing::{debug, info, warn};

use crate::analysis::aggregate::{aggregate, CountyColorMap, StateAggregate};
use crate::analysis::badges::{state_badges, StateBadge};
use crate::analysis::histogram::{event_type_histogram, EventTypeCount};
use crate::cache::{AlertCache, ReferenceDataCache};
use crate::ingest::presets::{PresetRegistry, DEFAULT_PRESET};
use crate::model::{AlertCollection, HazmonError};

pub const SERVICE_NAME: &str = "hazmon_service";
pub const FETCHED_AT_HEADER: &str = "X-Alerts-Fetched-At";

const ENDPOINTS: [&str; 6] = [
    "/api/alerts",
    "/api/alerts/types",
    "/api/alerts/historical?preset={name}",
    "/api/alerts/summary?type={event}&preset={name}",
    "/api/counties",
    "/health",
];

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Everything the handlers read. Built once in `main`.
pub struct AppState {
    pub alerts: AlertCache,
    pub counties: ReferenceDataCache,
    pub presets: PresetRegistry,
}

// ---------------------------------------------------------------------------
// Response Types
// ---------------------------------------------------------------------------

/// Derived map views for one collection.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total_count: usize,
    pub filtered_count: usize,
    pub polygon_count: usize,
    pub zone_count: usize,
    pub type_filter: Option<String>,
    pub preset: Option<String>,
    pub county_colors: CountyColorMap,
    pub states: StateAggregate,
    pub state_badges: Vec<StateBadge>,
    pub event_types: Vec<EventTypeCount>,
    /// Fetch time of the live feed; `None` for presets.
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Transport-independent response: status, JSON body, extra headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl ApiResponse {
    pub fn json<T: Serialize + ?Sized>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                body,
                headers: Vec::new(),
            },
            Err(e) => Self::error(500, &format!("Failed to serialize response: {}", e)),
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Routes one GET request URL (path plus optional query string).
pub fn route(state: &AppState, url: &str) -> ApiResponse {
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, parse_query(query)),
        None => (url, HashMap::new()),
    };
    debug!(path, "routing request");

    match path {
        "/health" => handle_health(),
        "/api/alerts" => handle_alerts(state),
        "/api/alerts/types" => handle_alert_types(state),
        "/api/alerts/historical" => {
            let preset = query.get("preset").map(String::as_str).unwrap_or(DEFAULT_PRESET);
            handle_historical(state, preset)
        }
        "/api/alerts/summary" => handle_summary(
            state,
            query.get("type").map(String::as_str),
            query.get("preset").map(String::as_str),
        ),
        "/api/counties" => handle_counties(state),
        _ => ApiResponse::json(
            404,
            &serde_json::json!({
                "error": "Not found",
                "available_endpoints": ENDPOINTS,
            }),
        ),
    }
}

/// Decodes `a=1&b=two%20words`. Later duplicates win; empty values are
/// treated as absent.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value)?;
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((decode_component(key)?, value))
        })
        .collect()
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|s| s.into_owned())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn handle_health() -> ApiResponse {
    ApiResponse::json(
        200,
        &serde_json::json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

fn handle_alerts(state: &AppState) -> ApiResponse {
    match state.alerts.get() {
        Ok(snapshot) => {
            let response = ApiResponse::json(200, snapshot.collection.as_ref());
            match snapshot.fetched_at() {
                Some(at) => response.with_header(FETCHED_AT_HEADER, &at.to_rfc3339()),
                None => response,
            }
        }
        Err(e) => upstream_error("Failed to fetch alerts from upstream", &e),
    }
}

// With no cached feed and a failing upstream this is an empty list, not an
// error; the filter bar simply renders no buttons.
fn handle_alert_types(state: &AppState) -> ApiResponse {
    let histogram = match state.alerts.get() {
        Ok(snapshot) => event_type_histogram(&snapshot.collection.features),
        Err(e) => {
            warn!(error = %e, "no alerts available for type histogram");
            Vec::new()
        }
    };
    ApiResponse::json(200, &histogram)
}

fn handle_historical(state: &AppState, preset: &str) -> ApiResponse {
    match state.presets.get(preset) {
        Ok(collection) => ApiResponse::json(200, collection.as_ref()),
        Err(e) => ApiResponse::error(404, &e.to_string()),
    }
}

fn handle_summary(state: &AppState, type_filter: Option<&str>, preset: Option<&str>) -> ApiResponse {
    let (collection, fetched_at): (Arc<AlertCollection>, Option<DateTime<Utc>>) = match preset {
        Some(name) => match state.presets.get(name) {
            Ok(collection) => (collection, None),
            Err(e) => return ApiResponse::error(404, &e.to_string()),
        },
        None => match state.alerts.get() {
            Ok(snapshot) => {
                let at = snapshot.fetched_at();
                (snapshot.collection, at)
            }
            Err(e) => return upstream_error("Failed to fetch alerts from upstream", &e),
        },
    };

    ApiResponse::json(200, &summarize(&collection, type_filter, preset, fetched_at))
}

/// Builds the summary body for `collection`.
pub fn summarize(
    collection: &AlertCollection,
    type_filter: Option<&str>,
    preset: Option<&str>,
    fetched_at: Option<DateTime<Utc>>,
) -> SummaryResponse {
    let result = aggregate(collection, type_filter);
    let badges = state_badges(&result.states);

    SummaryResponse {
        total_count: result.total_count,
        filtered_count: result.filtered.len(),
        polygon_count: result.polygon_alerts.len(),
        zone_count: result.zone_alerts.len(),
        type_filter: type_filter.map(String::from),
        preset: preset.map(String::from),
        county_colors: result.county_colors,
        states: result.states,
        state_badges: badges,
        event_types: result.event_types,
        fetched_at,
    }
}

fn handle_counties(state: &AppState) -> ApiResponse {
    match state.counties.get() {
        Ok(dataset) => ApiResponse::json(200, dataset.as_ref()),
        Err(e) => upstream_error("Failed to fetch county boundaries", &e),
    }
}

fn upstream_error(message: &str, err: &HazmonError) -> ApiResponse {
    ApiResponse::json(
        502,
        &serde_json::json!({
            "error": message,
            "details": err.to_string(),
        }),
    )
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port. Blocks forever.
pub fn start_endpoint_server(port: u16, workers: usize, state: Arc<AppState>) -> Result<(), HazmonError> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| HazmonError::Server(format!("Failed to start HTTP server: {}", e)))?;
    let pool = ThreadPool::new(workers);

    info!(port, workers, "HTTP endpoint listening");
    for endpoint in ENDPOINTS {
        info!("   GET {}", endpoint);
    }

    for request in server.incoming_requests() {
        let state = Arc::clone(&state);
        pool.execute(move || handle_request(request, &state));
    }

    Ok(())
}

fn handle_request(request: tiny_http::Request, state: &AppState) {
    let api = if *request.method() == tiny_http::Method::Get {
        route(state, request.url())
    } else {
        ApiResponse::error(405, "Method not allowed")
    };

    let status = api.status;
    let url = request.url().to_string();
    if let Err(e) = request.respond(create_response(api)) {
        warn!(url = %url, error = %e, "failed to send response");
    } else {
        debug!(url = %url, status, "request served");
    }
}

/// Create HTTP response with JSON body
fn create_response(api: ApiResponse) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut response = tiny_http::Response::from_string(api.body).with_status_code(api.status);

    let headers = [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
    ];
    let extra = api.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()));

    for (name, value) in headers.into_iter().chain(extra) {
        match tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => response.add_header(header),
            Err(()) => warn!(header = name, "dropping invalid response header"),
        }
    }

    response
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
