//! MiniJinja Template Renderer
//!
//! Loads templates from the package root directory by their `/`-separated
//! identifier and renders them with strict undefined handling: a template
//! that names a variable the environment lacks fails instead of rendering
//! an empty string.

use std::path::Path;

use minijinja::{path_loader, Environment, ErrorKind, UndefinedBehavior};

use crate::domain::ports::{RenderError, TemplateRenderer};
use crate::domain::value_objects::TemplateEnvironment;

/// Template renderer backed by minijinja
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Renderer whose template identifiers are relative to `package_dir`
    pub fn new(package_dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(package_dir.as_ref().to_path_buf()));
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

/// `a/b/c.tmplt` regardless of the host path separator
fn template_name(template: &Path) -> String {
    template
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn map_error(name: &str, err: minijinja::Error) -> RenderError {
    let detail = format!("{:#}", err);
    match err.kind() {
        ErrorKind::TemplateNotFound => RenderError::NotFound(name.to_string()),
        ErrorKind::SyntaxError => RenderError::Syntax(detail),
        ErrorKind::UndefinedError => RenderError::UndefinedVariable(detail),
        _ => RenderError::Other(detail),
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &Path,
        environment: &TemplateEnvironment,
    ) -> Result<String, RenderError> {
        let name = template_name(template);
        let tmpl = self
            .env
            .get_template(&name)
            .map_err(|e| map_error(&name, e))?;
        tmpl.render(environment).map_err(|e| map_error(&name, e))
    }
}
