//! Command handlers for the `pantry` binary

mod push;

pub use push::{cmd_push, Remote};
