//! TemplateRenderer port
//!
//! Renders a template file against a variable environment. The template
//! language itself belongs to the implementation.

use std::fmt;
use std::path::Path;

use crate::domain::value_objects::TemplateEnvironment;

/// Template rendering errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No template with this identifier
    NotFound(String),
    /// The template source does not parse
    Syntax(String),
    /// The template referenced a variable the environment does not define
    UndefinedVariable(String),
    /// Any other renderer failure
    Other(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "template not found: {}", name),
            Self::Syntax(msg) => write!(f, "syntax error: {}", msg),
            Self::UndefinedVariable(msg) => write!(f, "undefined variable: {}", msg),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Renders templates by identifier
///
/// The identifier is the template's path relative to the package root
/// directory, e.g. `hosts/etc/hosts.tmplt`.
pub trait TemplateRenderer {
    fn render(&self, template: &Path, environment: &TemplateEnvironment)
        -> Result<String, RenderError>;
}

impl<T: TemplateRenderer + ?Sized> TemplateRenderer for &T {
    fn render(
        &self,
        template: &Path,
        environment: &TemplateEnvironment,
    ) -> Result<String, RenderError> {
        (**self).render(template, environment)
    }
}
