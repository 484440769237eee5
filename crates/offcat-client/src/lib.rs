//! Async client for the OpenFoodFacts HTTP API plus the browse-session
//! state machine built on top of it.
//!
//! [`OffClient`] is the thin gateway: timeboxed requests, no retries, every
//! heterogeneous upstream shape normalized into one [`offcat_core::PageEnvelope`].
//! [`BrowseSession`] layers the filter-priority query orchestration and
//! load-more pagination over it.

pub mod client;
pub mod error;
pub mod normalize;
pub mod session;

pub use client::{CategoryListing, OffClient};
pub use error::UpstreamError;
pub use normalize::normalize_page;
pub use session::{BrowseSession, QueryOutcome, QueryTicket};
