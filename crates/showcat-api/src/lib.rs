//! API client library for showcat.
//!
//! Provides the TVmaze client and the catalog/detail fetch orchestration
//! built on top of it.

/// TVmaze API client.
pub mod tvmaze;
