//! MTA Bus Time API client.
//!
//! This module provides an HTTP client for the Bus Time "where" API,
//! which serves a transit agency's route/stop catalog.
//!
//! Key characteristics of Bus Time:
//! - Response shapes are inconsistent across endpoints: route lists and
//!   single-stop detail are XML, stops-for-route is JSON
//! - Ids are agency-qualified and may contain spaces ("MTA NYCT_B65"),
//!   so path segments must be percent-encoded
//! - A stops-for-route document references stops indirectly through a
//!   document-local reference table

mod client;
mod error;
mod types;

pub use client::{BustimeConfig, TransitClient};
pub use error::BustimeError;
pub use types::{
    GroupName, RawRoute, References, RouteListDocument, StopDetailDocument, StopGroup,
    StopGrouping, StopReference, StopsForRouteDocument, StopsForRouteData, StopsForRouteEntry,
};
