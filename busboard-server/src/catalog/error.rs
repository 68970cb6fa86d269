//! Catalog error types.

use crate::bustime::BustimeError;

/// Errors from catalog normalization and resolution.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The upstream fetch failed (transport or malformed body)
    #[error(transparent)]
    Upstream(#[from] BustimeError),

    /// A stops-for-route document carried no stop-grouping at all.
    /// Upstream guarantees one per route, so this is a data error.
    #[error("stops-for-route response has no stop grouping")]
    MissingStopGrouping,

    /// No stop-group with the requested direction id
    #[error("direction {direction_id} not found on this route")]
    DirectionNotFound { direction_id: String },

    /// No direction-group on the route contains the requested stop
    #[error("stop {stop_id} not found in any direction of this route")]
    StopNotOnRoute { stop_id: String },
}
