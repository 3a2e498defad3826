use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("no `{0}` template configured for the custom target")]
    MissingTemplate(&'static str),
}
