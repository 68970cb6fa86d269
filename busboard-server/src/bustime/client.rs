//! Bus Time HTTP client.
//!
//! Issues requests against the MTA Bus Time "where" API and returns raw
//! parsed documents. Interpreting the document shapes (flattening,
//! cross-referencing) happens in the catalog layer.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::error::BustimeError;
use super::types::{RouteListDocument, StopDetailDocument, StopsForRouteDocument};

/// Default base URL for the Bus Time API.
const DEFAULT_BASE_URL: &str = "http://bustime.mta.info/api/where";

/// Characters percent-encoded inside a URL path segment.
///
/// Agency-qualified ids contain spaces ("MTA NYCT_B65"), and `%`/`&`
/// must not leak into the path or query raw.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'?')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Configuration for the Bus Time client.
#[derive(Debug, Clone)]
pub struct BustimeConfig {
    /// API key passed as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production Bus Time)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BustimeConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the Bus Time API.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TransitClient {
    /// Create a new Bus Time client.
    pub fn new(config: BustimeConfig) -> Result<Self, BustimeError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch the route catalog for an agency (XML endpoint).
    pub async fn routes_for_agency(
        &self,
        agency_id: &str,
    ) -> Result<RouteListDocument, BustimeError> {
        let url = format!(
            "{}/routes-for-agency/{}.xml",
            self.base_url,
            encode_path_segment(agency_id)
        );

        let body = self.get_checked(&url, &[]).await?;
        RouteListDocument::parse(&body)
    }

    /// Fetch the stops-for-route document (JSON endpoint, version 2).
    ///
    /// This single document carries the route's stop-groupings and the
    /// shared stop reference table; directions, per-direction stop lists
    /// and direction resolution are all read out of it.
    pub async fn stops_for_route(
        &self,
        route_id: &str,
    ) -> Result<StopsForRouteDocument, BustimeError> {
        let url = format!(
            "{}/stops-for-route/{}.json",
            self.base_url,
            encode_path_segment(route_id)
        );

        let body = self
            .get_checked(&url, &[("includePolylines", "false"), ("version", "2")])
            .await?;

        serde_json::from_str(&body).map_err(|e| BustimeError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Fetch metadata for a single stop (XML endpoint).
    pub async fn stop_detail(&self, stop_id: &str) -> Result<StopDetailDocument, BustimeError> {
        let url = format!(
            "{}/stop/{}.xml",
            self.base_url,
            encode_path_segment(stop_id)
        );

        let body = self.get_checked(&url, &[]).await?;
        StopDetailDocument::parse(&body)
    }

    /// Issue a GET with the API key attached, returning the body of a
    /// successful response or a transport-class error.
    async fn get_checked(
        &self,
        url: &str,
        extra_query: &[(&str, &str)],
    ) -> Result<String, BustimeError> {
        let response = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(extra_query)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BustimeError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BustimeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

/// Percent-encode one URL path segment.
fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = BustimeConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = BustimeConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn client_creation() {
        let client = TransitClient::new(BustimeConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn path_segment_encoding() {
        assert_eq!(encode_path_segment("MTA NYCT_B65"), "MTA%20NYCT_B65");
        assert_eq!(encode_path_segment("a&b"), "a%26b");
        assert_eq!(encode_path_segment("50%"), "50%25");
        assert_eq!(encode_path_segment("plain-B65"), "plain-B65");
    }
}
