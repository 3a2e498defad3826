pub mod config;
pub mod error;
pub mod parse;
pub mod transform;
pub mod view;

pub use transform::build;

/// Template sources handed to a renderer. `None` selects the renderer's
/// built-in template.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    pub class: Option<String>,
}

/// Trait for collaborators that turn a view model into source text.
pub trait Renderer {
    type Error: std::error::Error;
    fn render(&self, view: &view::ViewModel, templates: &TemplateSet) -> Result<String, Self::Error>;
}
