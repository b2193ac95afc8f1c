//! Fetch gateway: one HTTP read of the asset catalog per session.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{CatalogClient, DEFAULT_API_URL, FetchError};
