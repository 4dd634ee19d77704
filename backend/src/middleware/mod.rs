//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns,
//! currently distributed trace propagation.

pub mod trace;

pub use trace::Trace;
