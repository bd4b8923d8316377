//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod attributes;
mod config_warning;
mod ignore_patterns;
mod remote_path;
mod template_env;

pub use attributes::{Attributes, FileMode, InvalidMode};
pub use config_warning::ConfigWarning;
pub use ignore_patterns::IgnorePattern;
pub use remote_path::{FileKind, RemotePath};
pub use template_env::TemplateEnvironment;
