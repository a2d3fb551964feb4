//! Firi REST API client.
//!
//! [`FiriRestClient`] exposes one method per supported endpoint plus the
//! generic [`FiriRestClient::request`] they are built on. Endpoint paths and
//! the query builder live in [`endpoints`].

mod client;
pub mod endpoints;
mod private;
mod public;

pub use client::{DEFAULT_TIMEOUT, FiriRestClient, FiriRestClientBuilder};
pub use endpoints::{Endpoint, FIRI_BASE_URL};
