//! Catalog operations: fetch + normalize + cross-reference resolution.

use crate::cache::CachedTransitClient;

use super::error::CatalogError;
use super::normalize::{
    normalize_directions, normalize_routes, normalize_stop_detail, normalize_stops,
    resolve_route_direction,
};
use super::types::{Direction, Route, RouteDirectionInfo, Stop, StopDetail, StopInfo};

/// The catalog service the request handlers talk to.
///
/// Owns the (cached) Bus Time client and the configured agency id; every
/// method is one fetch-and-normalize pipeline returning a flat record or
/// a classifiable `CatalogError`.
pub struct CatalogService {
    client: CachedTransitClient,
    agency_id: String,
}

impl CatalogService {
    /// Create a new catalog service for one agency.
    pub fn new(client: CachedTransitClient, agency_id: impl Into<String>) -> Self {
        Self {
            client,
            agency_id: agency_id.into(),
        }
    }

    /// The agency this catalog is scoped to.
    pub fn agency_id(&self) -> &str {
        &self.agency_id
    }

    /// The agency's route list, in upstream order.
    pub async fn routes(&self) -> Result<Vec<Route>, CatalogError> {
        let doc = self.client.routes_for_agency(&self.agency_id).await?;
        Ok(normalize_routes(&doc))
    }

    /// The direction list for a route.
    pub async fn directions(&self, route_id: &str) -> Result<Vec<Direction>, CatalogError> {
        let doc = self.client.stops_for_route(route_id).await?;
        normalize_directions(&doc)
    }

    /// The stops of one direction of a route, names resolved.
    pub async fn stops(
        &self,
        route_id: &str,
        direction_id: &str,
    ) -> Result<Vec<Stop>, CatalogError> {
        let doc = self.client.stops_for_route(route_id).await?;
        normalize_stops(&doc, direction_id)
    }

    /// Metadata for a single stop.
    pub async fn stop_detail(&self, stop_id: &str) -> Result<StopDetail, CatalogError> {
        let doc = self.client.stop_detail(stop_id).await?;
        Ok(normalize_stop_detail(&doc))
    }

    /// Which direction-group of a route a stop belongs to.
    pub async fn route_direction_for_stop(
        &self,
        route_id: &str,
        stop_id: &str,
    ) -> Result<RouteDirectionInfo, CatalogError> {
        let doc = self.client.stops_for_route(route_id).await?;
        resolve_route_direction(&doc, stop_id)
    }

    /// Merged direction + stop metadata for one (route, stop) pair.
    ///
    /// The two upstream fetches are independent, so they are issued
    /// concurrently and joined.
    pub async fn stop_info(
        &self,
        route_id: &str,
        stop_id: &str,
    ) -> Result<StopInfo, CatalogError> {
        let (stops_doc, detail_doc) = tokio::try_join!(
            self.client.stops_for_route(route_id),
            self.client.stop_detail(stop_id),
        )?;

        let direction = resolve_route_direction(&stops_doc, stop_id)?;
        let detail = normalize_stop_detail(&detail_doc);

        Ok(StopInfo::merge(direction, detail))
    }
}
