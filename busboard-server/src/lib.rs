//! Bus stop tracking admin server.
//!
//! A small web application that lets an operator browse a transit
//! agency's route/stop catalog (via the MTA Bus Time API) and curate the
//! list of tracked stops a serial-bus indicator display watches.

pub mod bustime;
pub mod cache;
pub mod catalog;
pub mod config_store;
pub mod registry;
pub mod web;
