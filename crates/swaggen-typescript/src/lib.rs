pub mod context;
pub mod error;
pub mod renderer;
pub mod type_mapper;

pub use error::RenderError;
pub use renderer::TypeScriptRenderer;
