/// AlertCollection, AlertFeature, AlertProperties, HazmonError
/// Core data types for the hazard alert service.
///
/// This module defines the shared domain model imported by all other modules.
/// The upstream NWS payload is free-form JSON; everything here is the typed,
/// normalized record produced at the ingestion boundary. Severity and urgency
/// values outside the known vocabulary are folded into `Unknown` during
/// deserialization rather than rejected.

use serde::{Deserialize, Deserializer, Serialize};

use crate::alert::severity::Severity;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// GeoJSON type tag carried by every collection.
pub const FEATURE_COLLECTION: &str = "FeatureCollection";

/// Event name used when an alert arrives without one.
pub const UNKNOWN_EVENT: &str = "Unknown";

// ---------------------------------------------------------------------------
// Collection types
// ---------------------------------------------------------------------------

/// An ordered set of alert features, the unit exchanged with the upstream
/// source, the cache, and the historical snapshot registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCollection {
    #[serde(rename = "type", default = "feature_collection_tag")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<AlertFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl AlertCollection {
    pub fn new(features: Vec<AlertFeature>) -> Self {
        Self {
            kind: feature_collection_tag(),
            features,
            title: None,
            updated: None,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn feature_collection_tag() -> String {
    FEATURE_COLLECTION.to_string()
}

/// A single hazard notice.
///
/// `geometry` is present for polygon alerts and `None` for zone-only
/// alerts, which must be placed on the map through their SAME codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "feature_tag")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Option<geojson::Geometry>,
    #[serde(default)]
    pub properties: AlertProperties,
}

fn feature_tag() -> String {
    "Feature".to_string()
}

impl AlertFeature {
    /// True when the alert carries its own polygon.
    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn event(&self) -> &str {
        &self.properties.event
    }

    pub fn severity(&self) -> Severity {
        self.properties.severity
    }

    /// SAME codes in the order the upstream listed them, unvalidated.
    pub fn same_codes(&self) -> &[String] {
        &self.properties.geocode.same
    }
}

/// Typed alert properties. Field names follow the NWS CAP-in-GeoJSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    #[serde(default = "unknown_event", deserialize_with = "de_event")]
    pub event: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default, deserialize_with = "de_null_string")]
    pub area_desc: String,
    #[serde(default, deserialize_with = "de_geocode")]
    pub geocode: Geocode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certainty: Option<String>,
}

impl Default for AlertProperties {
    fn default() -> Self {
        Self {
            event: unknown_event(),
            severity: Severity::Unknown,
            urgency: Urgency::Unknown,
            area_desc: String::new(),
            geocode: Geocode::default(),
            headline: None,
            description: None,
            instruction: None,
            sender_name: None,
            sent: None,
            effective: None,
            expires: None,
            status: None,
            message_type: None,
            certainty: None,
        }
    }
}

/// Area codes attached to an alert.
///
/// SAME codes are 6 characters: a leading area-type digit followed by the
/// 5-digit county FIPS code. Malformed entries are kept here and skipped
/// by the aggregation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geocode {
    #[serde(rename = "SAME", default, deserialize_with = "de_string_entries")]
    pub same: Vec<String>,
    #[serde(rename = "UGC", default, deserialize_with = "de_string_entries")]
    pub ugc: Vec<String>,
}

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// CAP urgency vocabulary. Unrecognized values normalize to `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<serde_json::Value>", into = "String")]
pub enum Urgency {
    Immediate,
    Expected,
    Future,
    Past,
    #[default]
    Unknown,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Immediate => "Immediate",
            Urgency::Expected => "Expected",
            Urgency::Future => "Future",
            Urgency::Past => "Past",
            Urgency::Unknown => "Unknown",
        }
    }
}

impl From<&str> for Urgency {
    fn from(s: &str) -> Self {
        match s {
            "Immediate" => Urgency::Immediate,
            "Expected" => Urgency::Expected,
            "Future" => Urgency::Future,
            "Past" => Urgency::Past,
            _ => Urgency::Unknown,
        }
    }
}

impl From<Option<serde_json::Value>> for Urgency {
    fn from(value: Option<serde_json::Value>) -> Self {
        value
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .map(Urgency::from)
            .unwrap_or(Urgency::Unknown)
    }
}

impl From<Urgency> for String {
    fn from(u: Urgency) -> Self {
        u.as_str().to_string()
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

fn unknown_event() -> String {
    UNKNOWN_EVENT.to_string()
}

// Upstream payloads are loosely typed: a wrong-typed field degrades to its
// default rather than failing the collection.

fn string_value(value: Option<serde_json::Value>) -> Option<String> {
    match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    }
}

fn de_event<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let event = string_value(Option::deserialize(deserializer)?);
    Ok(event
        .filter(|e| !e.is_empty())
        .unwrap_or_else(unknown_event))
}

fn de_null_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_value(Option::deserialize(deserializer)?).unwrap_or_default())
}

/// Keeps the string entries of an array; anything else becomes empty.
fn de_string_entries<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(entries)
}

fn de_geocode<'de, D>(deserializer: D) -> Result<Geocode, D::Error>
where
    D: Deserializer<'de>,
{
    let geocode = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(value @ serde_json::Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        _ => Geocode::default(),
    };
    Ok(geocode)
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors surfaced by the cache, preset, and configuration layers.
///
/// Aggregation never produces one of these: malformed geocodes and unknown
/// severities degrade silently.
#[derive(Debug, thiserror::Error)]
pub enum HazmonError {
    /// An upstream fetch failed and there was no cached copy to fall back on.
    #[error("Upstream {source_name} unavailable: {reason}")]
    UpstreamUnavailable { source_name: String, reason: String },

    /// The requested historical preset is not registered.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP listener could not be started.
    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HazmonError {
    pub fn upstream(source_name: &str, reason: impl std::fmt::Display) -> Self {
        HazmonError::UpstreamUnavailable {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
