//! Domain Services
//!
//! Pure business logic services that operate on domain values.
//! These services have no I/O dependencies and are easily testable.

mod deletion_resolver;
mod metadata_resolver;

pub use deletion_resolver::DeletionResolver;
pub use metadata_resolver::{parse_metadata, MetadataEntry, MetadataResolver, MetadataTarget};
