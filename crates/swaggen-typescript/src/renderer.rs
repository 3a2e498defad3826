use log::debug;
use minijinja::{Environment, ErrorKind, Value};
use swaggen_core::config::{BuildOptions, TargetDialect};
use swaggen_core::view::ViewModel;
use swaggen_core::{Renderer, TemplateSet};

use crate::context::view_context;
use crate::error::RenderError;

const CLASS_TEMPLATE_NAME: &str = "class.ts.j2";
const CLASS_TEMPLATE: &str = include_str!("../templates/class.ts.j2");

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Render any value as a JSON literal, which is also a valid TypeScript literal.
fn quote(value: Value) -> Result<String, minijinja::Error> {
    serde_json::to_string(&value).map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "value cannot be quoted").with_source(e)
    })
}

/// Renders a view model into a single TypeScript client module.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptRenderer {
    target: TargetDialect,
}

impl TypeScriptRenderer {
    pub fn new(target: TargetDialect) -> Self {
        Self { target }
    }

    pub fn for_options(options: &BuildOptions) -> Self {
        Self::new(options.target)
    }
}

impl Renderer for TypeScriptRenderer {
    type Error = RenderError;

    fn render(&self, view: &ViewModel, templates: &TemplateSet) -> Result<String, RenderError> {
        let source = match (&templates.class, self.target) {
            (Some(custom), _) => custom.as_str(),
            (None, TargetDialect::Custom) => return Err(RenderError::MissingTemplate("class")),
            (None, _) => CLASS_TEMPLATE,
        };

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("escape_jsdoc", escape_jsdoc);
        env.add_filter("quote", quote);
        env.add_template(CLASS_TEMPLATE_NAME, source)?;
        let tmpl = env.get_template(CLASS_TEMPLATE_NAME)?;

        debug!(
            "rendering {} methods, {} models with {} template",
            view.methods.len(),
            view.definitions.len(),
            if templates.class.is_some() { "custom" } else { "built-in" }
        );
        Ok(tmpl.render(view_context(view))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_filter() {
        assert_eq!(quote(Value::from("a\"b")).unwrap(), r#""a\"b""#);
        assert_eq!(quote(Value::from(3)).unwrap(), "3");
        assert_eq!(quote(Value::from(true)).unwrap(), "true");
    }

    #[test]
    fn test_escape_jsdoc() {
        assert_eq!(escape_jsdoc("ends */ here".into()), "ends *\\/ here");
    }

    #[test]
    fn test_builtin_template_parses() {
        let mut env = Environment::new();
        env.add_filter("escape_jsdoc", escape_jsdoc);
        env.add_filter("quote", quote);
        assert!(env.add_template(CLASS_TEMPLATE_NAME, CLASS_TEMPLATE).is_ok());
    }
}
