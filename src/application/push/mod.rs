//! Push Module
//!
//! Synchronizes one package tree onto one host.
//!
//! ## Structure
//!
//! - `options` - Layout and switches (`PushOptions`)
//! - `result` - Result types (`PushReport`)
//! - `use_case` - The engine (`PackageSync`)
//!
//! ## Usage
//!
//! ```ignore
//! use pantry::application::push::{PackageSync, PushOptions};
//!
//! let sync = PackageSync::new(SshRemoteFs::new("root@web1"), renderer, PushOptions::new("packages"));
//! let report = sync.push_package_file_set("nginx", &inventory, "web1", aux)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{
    PushOptions, DEFAULT_DELETE_FILE, DEFAULT_METADATA_FILE, DEFAULT_TEMPLATE_SUFFIX,
};
pub use result::PushReport;
pub use use_case::PackageSync;
