/// County boundary reference dataset.
///
/// US county polygons keyed by 5-digit FIPS code (the feature `id`), as
/// published in the plotly datasets repository:
///   https://raw.githubusercontent.com/plotly/datasets/master/geojson-counties-fips.json
///
/// The file is large (tens of MB) and never changes during a process
/// lifetime, so it is fetched with a longer timeout and held by
/// `cache::reference::ReferenceDataCache` forever once loaded.

use std::time::Duration;

use geojson::GeoJson;
use tracing::debug;

use crate::ingest::{http_client, FetchError, ReferenceSource};

pub const COUNTIES_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/master/geojson-counties-fips.json";

/// The reference dataset: one feature per county.
pub type CountyBoundaries = geojson::FeatureCollection;

/// Parses a county boundary GeoJSON body. Anything other than a
/// FeatureCollection at the top level is a parse error.
pub fn parse_county_boundaries(json: &str) -> Result<CountyBoundaries, FetchError> {
    let geojson: GeoJson = json
        .parse()
        .map_err(|e| FetchError::Parse(format!("invalid GeoJSON: {}", e)))?;

    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => Err(FetchError::Parse(
            "expected a FeatureCollection at the top level".to_string(),
        )),
    }
}

/// Blocking client for the county boundary file.
pub struct CountyBoundarySource {
    client: reqwest::blocking::Client,
    url: String,
}

impl CountyBoundarySource {
    pub fn new(url: &str, user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: http_client(user_agent, timeout)?,
            url: url.to_string(),
        })
    }
}

impl ReferenceSource for CountyBoundarySource {
    fn name(&self) -> &str {
        "county-boundaries"
    }

    fn fetch_reference(&self) -> Result<CountyBoundaries, FetchError> {
        debug!(url = %self.url, "fetching county boundaries");

        let response = self.client.get(&self.url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Http(response.status().as_u16()));
        }

        let body = response.text()?;
        parse_county_boundaries(&body)
    }
}
