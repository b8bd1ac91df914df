/// NWS active alerts API client.
///
/// Handles URL construction, fetching, and parsing for:
///   https://api.weather.gov/alerts/active
///
/// The endpoint returns CAP alerts rendered as a GeoJSON FeatureCollection.
/// Polygon alerts carry their own geometry; zone-only alerts have
/// `geometry: null` and are located through `properties.geocode.SAME`.
/// See `fixtures.rs` for annotated examples of the response structure.
///
/// NWS rejects requests without a `User-Agent` identifying the caller.

use std::time::Duration;

use tracing::debug;

use crate::ingest::{http_client, AlertSource, FetchError};
use crate::model::AlertCollection;

pub const NWS_ALERTS_URL: &str = "https://api.weather.gov/alerts/active";
pub const GEO_JSON_ACCEPT: &str = "application/geo+json";

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the active-alerts URL, optionally narrowed to one state or marine
/// area code (e.g. `"FL"`).
pub fn build_alerts_url(base_url: &str, area: Option<&str>) -> String {
    match area {
        Some(area) => format!("{}?area={}", base_url, urlencoding::encode(area)),
        None => base_url.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses an alerts response body into an `AlertCollection`.
///
/// Missing or null optional fields are normalized rather than rejected; only
/// a body that is not a JSON object of the expected shape is an error.
///
/// # Errors
/// - `FetchError::Parse` — malformed JSON or a non-object top level.
pub fn parse_alert_collection(json: &str) -> Result<AlertCollection, FetchError> {
    serde_json::from_str(json)
        .map_err(|e| FetchError::Parse(format!("JSON deserialization failed: {}", e)))
}

// ---------------------------------------------------------------------------
// Live source
// ---------------------------------------------------------------------------

/// Blocking client for the NWS live alert feed.
pub struct NwsAlertSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl NwsAlertSource {
    pub fn new(url: &str, user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: http_client(user_agent, timeout)?,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AlertSource for NwsAlertSource {
    fn name(&self) -> &str {
        "nws-alerts"
    }

    fn fetch_alerts(&self) -> Result<AlertCollection, FetchError> {
        debug!(url = %self.url, "fetching active alerts");

        let response = self
            .client
            .get(&self.url)
            .header("Accept", GEO_JSON_ACCEPT)
            .send()?;

        if !response.status().is_success() {
            return Err(FetchError::Http(response.status().as_u16()));
        }

        let body = response.text()?;
        parse_alert_collection(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
