//! Data-access boundary for the report engine.
//!
//! The engine never fetches data on its own initiative; everything arrives
//! through the [`DataProvider`] trait. `ApiClient` implements it over the
//! admin REST API; `StaticProvider` implements it over in-memory lists for
//! tests and snapshot-driven runs.

pub mod client;
pub mod error;
pub mod provider;

pub use client::ApiClient;
pub use error::ApiError;
pub use provider::{district_ids_for_groups, DataProvider, StaticProvider};
