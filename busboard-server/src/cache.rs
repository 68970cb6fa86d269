//! Caching layer for Bus Time API responses.
//!
//! Four of the catalog operations read the same stops-for-route document
//! (directions, per-direction stops, direction resolution, merged stop
//! info), and the operator UI walks route → direction → stop in quick
//! succession. Caching the raw documents for a short TTL keeps one click
//! sequence down to a couple of upstream requests.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::bustime::{
    BustimeError, RouteListDocument, StopDetailDocument, StopsForRouteDocument, TransitClient,
};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached documents.
    pub ttl: Duration,

    /// Maximum number of cached documents per endpoint.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 500,
        }
    }
}

/// Bus Time client with response caching.
///
/// Wraps a `TransitClient` and caches the route-list and stops-for-route
/// documents, keyed by agency id and route id respectively. Stop detail
/// is fetched directly: it is a single small document requested at most
/// once per operator action.
pub struct CachedTransitClient {
    client: TransitClient,
    routes: MokaCache<String, Arc<RouteListDocument>>,
    stops_for_route: MokaCache<String, Arc<StopsForRouteDocument>>,
}

impl CachedTransitClient {
    /// Create a new cached client.
    pub fn new(client: TransitClient, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let stops_for_route = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            routes,
            stops_for_route,
        }
    }

    /// Get the route-list document for an agency, using cache if available.
    pub async fn routes_for_agency(
        &self,
        agency_id: &str,
    ) -> Result<Arc<RouteListDocument>, BustimeError> {
        if let Some(cached) = self.routes.get(agency_id).await {
            return Ok(cached);
        }

        let doc = Arc::new(self.client.routes_for_agency(agency_id).await?);
        self.routes.insert(agency_id.to_string(), doc.clone()).await;

        Ok(doc)
    }

    /// Get the stops-for-route document, using cache if available.
    pub async fn stops_for_route(
        &self,
        route_id: &str,
    ) -> Result<Arc<StopsForRouteDocument>, BustimeError> {
        if let Some(cached) = self.stops_for_route.get(route_id).await {
            return Ok(cached);
        }

        let doc = Arc::new(self.client.stops_for_route(route_id).await?);
        self.stops_for_route
            .insert(route_id.to_string(), doc.clone())
            .await;

        Ok(doc)
    }

    /// Get stop detail, bypassing the cache.
    pub async fn stop_detail(&self, stop_id: &str) -> Result<StopDetailDocument, BustimeError> {
        self.client.stop_detail(stop_id).await
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &TransitClient {
        &self.client
    }

    /// Number of cached documents across both endpoint caches.
    pub fn cache_entry_count(&self) -> u64 {
        self.routes.entry_count() + self.stops_for_route.entry_count()
    }

    /// Invalidate all cached documents.
    pub fn invalidate_cache(&self) {
        self.routes.invalidate_all();
        self.stops_for_route.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bustime::BustimeConfig;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 500);
    }

    #[tokio::test]
    async fn cache_starts_empty() {
        let client = TransitClient::new(BustimeConfig::new("test-key")).unwrap();
        let cached = CachedTransitClient::new(client, &CacheConfig::default());
        assert_eq!(cached.cache_entry_count(), 0);
    }
}
