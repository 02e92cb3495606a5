//! Service Layer
//!
//! Business logic between the route handlers and the gateways. Routes stay
//! thin; the analysis orchestration lives here so it can be exercised
//! against in-memory gateway fakes.

mod analysis;

pub use analysis::*;
