/// Upstream data sources.
///
/// Submodules:
/// - `nws`      — NWS active alerts API: URL construction, fetch, parsing.
/// - `counties` — county boundary GeoJSON (large, static reference data).
/// - `presets`  — historical alert snapshots registered by name.
/// - `fixtures` (test only) — representative alert payloads.
///
/// The caches depend only on the `AlertSource` and `ReferenceSource` traits,
/// so tests substitute in-process sources for the HTTP clients.

pub mod counties;
pub mod nws;
pub mod presets;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::model::AlertCollection;

pub use counties::CountyBoundaries;

// ---------------------------------------------------------------------------
// Fetch errors
// ---------------------------------------------------------------------------

/// Why a single upstream fetch failed. Timeouts surface as `Transport`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx HTTP response.
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Connection, TLS, or timeout failure before a response arrived.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The response body could not be deserialized.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Http(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Source traits
// ---------------------------------------------------------------------------

/// Live alert feed.
pub trait AlertSource: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    fn fetch_alerts(&self) -> Result<AlertCollection, FetchError>;
}

/// Static reference dataset, fetched at most once per process.
pub trait ReferenceSource: Send + Sync {
    fn name(&self) -> &str;

    fn fetch_reference(&self) -> Result<CountyBoundaries, FetchError>;
}

/// Builds the blocking HTTP client shared by the upstream sources.
pub(crate) fn http_client(
    user_agent: &str,
    timeout: std::time::Duration,
) -> Result<reqwest::blocking::Client, FetchError> {
    reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {}", e)))
}
