//! ForensiTrain Core - domain model for OSINT investigations
//!
//! This crate provides the foundational, I/O-free primitives:
//! - Subject classification (phone number vs social handle)
//! - Backend payload shapes with a lenient deserialization boundary
//! - The entity-graph builder (typed nodes/links, star topology)
//! - Tabbed read-only projections of investigation results

pub mod subject;
pub mod enrichment;
pub mod graph;
pub mod investigation;
pub mod view;

pub use subject::*;
pub use enrichment::*;
pub use graph::*;
pub use investigation::*;
pub use view::*;

/// Maximum accepted image upload size in bytes (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for image analysis
pub const ALLOWED_IMAGE_MIME: &[&str] = &["image/jpeg", "image/png"];
