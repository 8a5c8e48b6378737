//! Play Console API layer
//!
//! A thin client over the `androidpublisher` v3 REST endpoints the tool
//! needs: opening an edit transaction and reading a track's releases.

pub mod client;
pub mod models;
