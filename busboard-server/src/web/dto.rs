//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::Route;
use crate::registry::TrackedStop;

/// Request to track a stop (or replace an existing tracking entry).
///
/// `route_name` is the agency-qualified route id as returned by the
/// catalog; the registry normalizes it before storing.
#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub route_name: String,

    /// Upstream stop id
    pub stop: String,

    /// Walking distance to the stop, in meters
    pub distance: f64,

    #[serde(rename = "redPin")]
    pub red_pin: String,

    #[serde(rename = "greenPin")]
    pub green_pin: String,
}

impl From<TrackRequest> for TrackedStop {
    fn from(req: TrackRequest) -> Self {
        TrackedStop {
            route_name: req.route_name,
            stop: req.stop,
            distance: req.distance,
            red_pin: req.red_pin,
            green_pin: req.green_pin,
        }
    }
}

/// Response for the route list.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<Route>,
}

/// Response for the tracked-stop list.
#[derive(Debug, Serialize)]
pub struct TrackedResponse {
    pub stops: Vec<TrackedStop>,
}

/// Error payload returned for all failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_request_uses_config_field_names() {
        let req: TrackRequest = serde_json::from_str(
            r#"{
  "route_name": "MTA NYCT_B65",
  "stop": "305183",
  "distance": 500,
  "redPin": "17",
  "greenPin": "18"
}"#,
        )
        .unwrap();

        assert_eq!(req.route_name, "MTA NYCT_B65");
        assert_eq!(req.distance, 500.0);
        assert_eq!(req.red_pin, "17");

        let stop: TrackedStop = req.into();
        assert_eq!(stop.green_pin, "18");
    }
}
