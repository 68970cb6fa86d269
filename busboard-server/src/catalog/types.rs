//! Flat catalog records produced by normalization.

use serde::Serialize;

/// A bus route, flattened from the agency route list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Agency-qualified route id, e.g. "MTA NYCT_B65". Globally unique.
    pub id: String,
    pub short_name: String,
    pub long_name: String,
    pub description: String,
}

/// A travel direction along a route.
///
/// The id is only unique within one route's stop-grouping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Direction {
    pub id: String,
    pub label: String,
}

/// A stop as listed for one direction of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
}

/// Stop metadata as seen through a specific route context.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDetail {
    pub stop_name: String,
    pub route_long_name: String,
    pub route_description: String,
}

/// The direction-group a stop belongs to for a given route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDirectionInfo {
    pub destination_label: String,
    pub direction_id: String,
}

/// Merged direction + stop metadata answer for the admin UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopInfo {
    pub destination_label: String,
    pub direction_id: String,
    pub stop_name: String,
    pub route_long_name: String,
    pub route_description: String,
}

impl StopInfo {
    /// Merge a resolved direction with normalized stop metadata.
    pub fn merge(direction: RouteDirectionInfo, detail: StopDetail) -> Self {
        Self {
            destination_label: direction.destination_label,
            direction_id: direction.direction_id,
            stop_name: detail.stop_name,
            route_long_name: detail.route_long_name,
            route_description: detail.route_description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_combines_both_halves() {
        let merged = StopInfo::merge(
            RouteDirectionInfo {
                destination_label: "DNTWN BKLYN FULTON MALL".to_string(),
                direction_id: "1".to_string(),
            },
            StopDetail {
                stop_name: "Flatbush Av & Tillary St".to_string(),
                route_long_name: "Downtown Brooklyn - Crown Heights".to_string(),
                route_description: "via Bergen St & Dean St".to_string(),
            },
        );

        assert_eq!(merged.destination_label, "DNTWN BKLYN FULTON MALL");
        assert_eq!(merged.direction_id, "1");
        assert_eq!(merged.stop_name, "Flatbush Av & Tillary St");
    }
}
