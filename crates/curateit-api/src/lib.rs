//! CurateIt REST API client.
//!
//! Wraps the curation backend's bearer-authenticated endpoints: login,
//! collection listing, gem creation, and title search. Also provides
//! Open Graph metadata extraction for arbitrary web pages, used to enrich
//! saved links.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod client;
pub mod error;
pub mod metadata;
pub mod types;

pub use client::CurateItClient;
pub use error::{ApiError, ApiResult};
pub use metadata::{OpenGraph, fetch_open_graph};
pub use types::{AuthSession, NewGem, SearchResults};
