//! Domain Layer
//!
//! The core of Pantry - metadata resolution and path mapping without I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (Attributes, RemotePath, IgnorePattern)
//! - `services/` - Domain services (MetadataResolver, DeletionResolver)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services only update their own tables
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod ports;
pub mod services;
pub mod value_objects;
