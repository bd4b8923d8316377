//! Common test utilities for Pantry integration tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated workspace with settings, inventory and packages
//! - `write_tree`: Build a package tree from `(path, content)` pairs
//! - Fixtures: Reusable settings and inventory content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
