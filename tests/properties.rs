//! Property tests for Pantry.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "remote path mirrors local".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/remote_path.rs"]
mod remote_path;

#[path = "properties/metadata.rs"]
mod metadata;
