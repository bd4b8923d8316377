//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (services, ports, value objects)
//! - Does NOT contain parsing or resolution rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PackageSync` - Walks a package tree and pushes it onto one host

pub mod push;

pub use push::{PackageSync, PushOptions, PushReport};
