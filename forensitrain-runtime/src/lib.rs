//! ForensiTrain Runtime - investigation lifecycle orchestration
//!
//! One orchestrator per investigation surface:
//! - At most one live request per subject
//! - Last-search-wins sequencing via a generation counter
//! - Superseded responses discarded on arrival (soft cancellation)

pub mod orchestrator;

pub use orchestrator::*;
