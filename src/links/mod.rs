//! Hypermedia support
//!
//! A named route table ([`RouteRegistry`]) and the [`LinkAssembler`] that
//! turns routes into the `links` attached to responses.

pub mod assembler;
pub mod registry;

pub use assembler::LinkAssembler;
pub use registry::{Route, RouteRegistry};
