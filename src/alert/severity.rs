/// CAP severity ranking for hazard alerts.
///
/// Severities are ordered most severe first:
///   Extreme < Severe < Moderate < Minor < Unknown
///
/// so "worst" is the minimum under `Ord`. Any value outside the vocabulary
/// is treated exactly like `Unknown`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color tokens
// ---------------------------------------------------------------------------

pub const COLOR_EXTREME: &str = "#d32f2f";
pub const COLOR_SEVERE: &str = "#e65100";
pub const COLOR_MODERATE: &str = "#f9a825";
pub const COLOR_MINOR: &str = "#0277bd";
pub const COLOR_UNKNOWN: &str = "#757575";

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Alert severity. Variant order is the ranking order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<serde_json::Value>", into = "String")]
pub enum Severity {
    Extreme,
    Severe,
    Moderate,
    Minor,
    #[default]
    Unknown,
}

impl Severity {
    /// All severities in ranking order, most severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Extreme,
        Severity::Severe,
        Severity::Moderate,
        Severity::Minor,
        Severity::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Extreme => "Extreme",
            Severity::Severe => "Severe",
            Severity::Moderate => "Moderate",
            Severity::Minor => "Minor",
            Severity::Unknown => "Unknown",
        }
    }

    /// Map color token for this severity.
    pub fn color(&self) -> &'static str {
        color_of(*self)
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        match s {
            "Extreme" => Severity::Extreme,
            "Severe" => Severity::Severe,
            "Moderate" => Severity::Moderate,
            "Minor" => Severity::Minor,
            _ => Severity::Unknown,
        }
    }
}

impl From<Option<String>> for Severity {
    fn from(s: Option<String>) -> Self {
        s.as_deref().map(Severity::from).unwrap_or(Severity::Unknown)
    }
}

// Numbers, objects and other non-string values rank as `Unknown` instead of
// failing the whole collection.
impl From<Option<serde_json::Value>> for Severity {
    fn from(value: Option<serde_json::Value>) -> Self {
        value
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .map(Severity::from)
            .unwrap_or(Severity::Unknown)
    }
}

impl From<Severity> for String {
    fn from(s: Severity) -> Self {
        s.as_str().to_string()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Returns the most severe entry, folding left from `Unknown`.
///
/// An empty input yields `Unknown`. Ties keep the earlier value, which is
/// indistinguishable for a closed enum but matters for the fold shape.
pub fn worst_of<I>(severities: I) -> Severity
where
    I: IntoIterator<Item = Severity>,
{
    severities
        .into_iter()
        .fold(Severity::Unknown, |worst, s| if s < worst { s } else { worst })
}

/// Fixed color per severity; `Unknown` is neutral gray.
pub fn color_of(severity: Severity) -> &'static str {
    match severity {
        Severity::Extreme => COLOR_EXTREME,
        Severity::Severe => COLOR_SEVERE,
        Severity::Moderate => COLOR_MODERATE,
        Severity::Minor => COLOR_MINOR,
        Severity::Unknown => COLOR_UNKNOWN,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
