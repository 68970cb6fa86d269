//! Catalog normalization and cross-reference resolution.
//!
//! Bus Time returns inconsistent, deeply nested shapes per endpoint.
//! This module turns the raw documents into stable flat records (route
//! list, directions, stops, stop metadata) and resolves the
//! cross-reference from a (route, stop) pair to its direction-group and
//! destination label.

mod error;
mod normalize;
mod service;
mod types;

pub use error::CatalogError;
pub use normalize::{
    normalize_directions, normalize_routes, normalize_stop_detail, normalize_stops,
    resolve_route_direction,
};
pub use service::CatalogService;
pub use types::{Direction, Route, RouteDirectionInfo, Stop, StopDetail, StopInfo};
