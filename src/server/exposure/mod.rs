//! API exposure
//!
//! Each exposure type consumes a `ServerHost` and produces a Router for that
//! protocol. REST is the only one.

pub mod rest;

pub use rest::RestExposure;
