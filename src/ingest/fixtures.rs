/// Test fixtures: representative payloads from the NWS active alerts API.
///
/// These fixtures are structurally complete but truncated to the fields the
/// parser and aggregator read. They reflect the GeoJSON envelope returned by:
///   https://api.weather.gov/alerts/active
///
/// NWS alerts response shape:
///   response.features[]
///     .id                      — alert URN (string)
///     .geometry                — Polygon / MultiPolygon, or null for zone-only alerts
///     .properties.event        — hazard type, e.g. "Tornado Warning"
///     .properties.severity     — Extreme | Severe | Moderate | Minor | Unknown
///     .properties.urgency      — Immediate | Expected | Future | Past | Unknown
///     .properties.areaDesc     — human-readable area list
///     .properties.geocode.SAME — 6-digit codes: area-type digit + county FIPS
///     .properties.geocode.UGC  — NWS zone / county identifiers
///
/// Note: polygon alerts still list SAME codes, so they contribute to state
/// tallies even though the map draws them from their own geometry.

use crate::model::{AlertFeature, AlertProperties, Geocode};

/// Three alerts: a polygon flood warning in Harris County TX, a zone-only
/// hurricane warning covering Lee and Charlotte counties FL, and a zone-only
/// tropical storm warning covering Lee FL and Chatham GA.
pub(crate) fn fixture_mixed_alerts_json() -> &'static str {
    r#"{
      "@context": ["https://geojson.org/geojson-ld/geojson-context.jsonld"],
      "type": "FeatureCollection",
      "title": "Current watches, warnings, and advisories",
      "updated": "2024-10-09T18:00:00+00:00",
      "features": [
        {
          "id": "https://api.weather.gov/alerts/urn:oid:2.49.0.1.840.0.aaa.001.1",
          "type": "Feature",
          "geometry": {
            "type": "Polygon",
            "coordinates": [[[-95.45, 29.80], [-95.30, 29.80], [-95.30, 29.70], [-95.45, 29.70], [-95.45, 29.80]]]
          },
          "properties": {
            "id": "urn:oid:2.49.0.1.840.0.aaa.001.1",
            "areaDesc": "Harris, TX",
            "geocode": { "SAME": ["048201"], "UGC": ["TXC201"] },
            "sent": "2024-10-09T17:40:00-05:00",
            "effective": "2024-10-09T17:40:00-05:00",
            "expires": "2024-10-09T23:45:00-05:00",
            "status": "Actual",
            "messageType": "Alert",
            "severity": "Severe",
            "certainty": "Likely",
            "urgency": "Immediate",
            "event": "Flood Warning",
            "senderName": "NWS Houston/Galveston TX",
            "headline": "Flood Warning issued October 9 at 5:40PM CDT until October 9 at 11:45PM CDT by NWS Houston/Galveston TX"
          }
        },
        {
          "id": "https://api.weather.gov/alerts/urn:oid:2.49.0.1.840.0.bbb.002.1",
          "type": "Feature",
          "geometry": null,
          "properties": {
            "id": "urn:oid:2.49.0.1.840.0.bbb.002.1",
            "areaDesc": "Lee; Charlotte",
            "geocode": { "SAME": ["012071", "012015"], "UGC": ["FLZ265", "FLZ165"] },
            "status": "Actual",
            "messageType": "Update",
            "severity": "Extreme",
            "certainty": "Likely",
            "urgency": "Expected",
            "event": "Hurricane Warning",
            "senderName": "NWS Tampa Bay Ruskin FL"
          }
        },
        {
          "id": "https://api.weather.gov/alerts/urn:oid:2.49.0.1.840.0.ccc.003.1",
          "type": "Feature",
          "geometry": null,
          "properties": {
            "id": "urn:oid:2.49.0.1.840.0.ccc.003.1",
            "areaDesc": "Lee; Chatham",
            "geocode": { "SAME": ["012071", "013051"], "UGC": ["FLZ265", "GAZ119"] },
            "status": "Actual",
            "messageType": "Alert",
            "severity": "Severe",
            "certainty": "Possible",
            "urgency": "Expected",
            "event": "Tropical Storm Warning",
            "senderName": "NWS Charleston SC"
          }
        }
      ]
    }"#
}

/// A single alert with most properties missing or outside the CAP
/// vocabulary. Parser must normalize rather than reject.
pub(crate) fn fixture_sparse_alert_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "id": "urn:test:sparse",
          "type": "Feature",
          "properties": {
            "severity": "Catastrophic",
            "urgency": "Whenever",
            "geocode": {}
          }
        }
      ]
    }"#
}

/// Builds one alert directly, for aggregation tests that don't need JSON.
/// `polygon` attaches a small placeholder square as the geometry.
pub(crate) fn feature(id: &str, event: &str, severity: &str, polygon: bool, same: &[&str]) -> AlertFeature {
    let geometry = polygon.then(|| {
        geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![-90.0, 40.0],
            vec![-89.0, 40.0],
            vec![-89.0, 41.0],
            vec![-90.0, 41.0],
            vec![-90.0, 40.0],
        ]]))
    });

    AlertFeature {
        id: id.to_string(),
        kind: "Feature".to_string(),
        geometry,
        properties: AlertProperties {
            event: event.to_string(),
            severity: severity.into(),
            geocode: Geocode {
                same: same.iter().map(|s| s.to_string()).collect(),
                ugc: Vec::new(),
            },
            ..AlertProperties::default()
        },
    }
}
