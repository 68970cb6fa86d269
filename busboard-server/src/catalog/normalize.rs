//! Normalization of raw Bus Time documents into flat catalog records.
//!
//! These functions are pure: they take a parsed upstream document and
//! reshape it, resolving the document-local cross-references. Anything
//! that needs the network lives in `catalog::service`.

use crate::bustime::{RouteListDocument, StopDetailDocument, StopsForRouteDocument, StopGrouping};

use super::error::CatalogError;
use super::types::{Direction, Route, RouteDirectionInfo, Stop, StopDetail};

/// Flatten a route-list document into `Route` records.
///
/// Upstream order is preserved; absent text fields become empty strings.
pub fn normalize_routes(doc: &RouteListDocument) -> Vec<Route> {
    doc.routes
        .iter()
        .map(|raw| Route {
            id: raw.id.clone().unwrap_or_default(),
            short_name: raw.short_name.clone().unwrap_or_default(),
            long_name: raw.long_name.clone().unwrap_or_default(),
            description: raw.description.clone().unwrap_or_default(),
        })
        .collect()
}

/// Extract the direction list (label + id) from the first stop-grouping.
pub fn normalize_directions(doc: &StopsForRouteDocument) -> Result<Vec<Direction>, CatalogError> {
    let grouping = first_grouping(doc)?;

    Ok(grouping
        .stop_groups
        .iter()
        .map(|group| Direction {
            id: group.id.clone(),
            label: group.name.name.clone(),
        })
        .collect())
}

/// List the stops of one direction, resolved against the document's
/// stop reference table.
///
/// Stop ids with no entry in the reference table are skipped: gaps in
/// the upstream feed are expected transient conditions, not errors.
pub fn normalize_stops(
    doc: &StopsForRouteDocument,
    direction_id: &str,
) -> Result<Vec<Stop>, CatalogError> {
    let grouping = first_grouping(doc)?;

    let group = grouping
        .stop_groups
        .iter()
        .find(|g| g.id == direction_id)
        .ok_or_else(|| CatalogError::DirectionNotFound {
            direction_id: direction_id.to_string(),
        })?;

    let stops = group
        .stop_ids
        .iter()
        .filter_map(|stop_id| {
            let found = doc
                .data
                .references
                .stops
                .iter()
                .find(|r| &r.id == stop_id);
            if found.is_none() {
                tracing::debug!(%stop_id, "skipping stop with no reference table entry");
            }
            found
        })
        .map(|r| Stop {
            id: r.id.clone(),
            name: r.name.clone(),
        })
        .collect();

    Ok(stops)
}

/// Extract stop metadata; missing fields default to empty strings.
pub fn normalize_stop_detail(doc: &StopDetailDocument) -> StopDetail {
    StopDetail {
        stop_name: doc.name.clone().unwrap_or_default(),
        route_long_name: doc.long_name.clone().unwrap_or_default(),
        route_description: doc.description.clone().unwrap_or_default(),
    }
}

/// Find the direction-group a stop belongs to.
///
/// A stop is expected to appear in exactly one group per route. If the
/// feed lists it in several, the first group in upstream order wins.
pub fn resolve_route_direction(
    doc: &StopsForRouteDocument,
    stop_id: &str,
) -> Result<RouteDirectionInfo, CatalogError> {
    let grouping = first_grouping(doc)?;

    grouping
        .stop_groups
        .iter()
        .find(|g| g.stop_ids.iter().any(|id| id == stop_id))
        .map(|g| RouteDirectionInfo {
            destination_label: g.name.name.clone(),
            direction_id: g.id.clone(),
        })
        .ok_or_else(|| CatalogError::StopNotOnRoute {
            stop_id: stop_id.to_string(),
        })
}

fn first_grouping(doc: &StopsForRouteDocument) -> Result<&StopGrouping, CatalogError> {
    doc.data
        .entry
        .stop_groupings
        .first()
        .ok_or(CatalogError::MissingStopGrouping)
}
