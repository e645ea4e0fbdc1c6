//! ForensiTrain Client - typed transport to the enrichment backend
//!
//! Wraps the five backend endpoints behind the [`Enrichment`] trait:
//! - Phone analyze / enrich
//! - Image analysis (with local pre-flight validation)
//! - Geosocial footprint
//! - Report export (JSON or PDF)
//!
//! All transport and envelope failures normalize to a single
//! [`ClientError::RequestFailed`] message; callers never branch on HTTP
//! status codes.

pub mod client;
pub mod preview;

pub use client::*;
pub use preview::*;
