//! Template Renderer Implementations

mod jinja;

pub use jinja::MiniJinjaRenderer;
