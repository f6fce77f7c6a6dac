//! services/api/src/lib.rs
//!
//! Library crate backing the `api` binary, split out so integration tests can
//! build the router without starting a server.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
