use super::operations::{ViewMethod, ViewSecurity};
use super::schemas::ResolvedType;
use serde::Serialize;

/// The fully resolved, template-ready view of a description document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    /// Base URL requests are issued against, when one can be computed.
    pub domain: Option<String>,
    pub class_name: String,
    pub module_name: String,
    pub is_node: bool,
    pub is_es6: bool,
    pub imports: Vec<String>,
    /// Document-level: `secure` is set when security definitions exist, the other
    /// flags when any secure method needs them.
    pub security: ViewSecurity,
    pub enumerations: Vec<EnumDefinition>,
    pub definitions: Vec<ViewDefinition>,
    pub methods: Vec<ViewMethod>,
}

/// An enumeration collected during the build, unique by `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDefinition {
    pub name: String,
    pub values: Vec<serde_json::Value>,
    pub description: Option<String>,
}

/// A model definition following the `…ResponseModel` naming convention.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDefinition {
    pub name: String,
    /// `name` without its first `Response`.
    pub model_plain_name: String,
    /// `model_plain_name` without its first `Model`.
    pub model_raw_name: String,
    pub description: Option<String>,
    pub is_response: bool,
    pub is_request: bool,
    pub includes: Vec<ViewInclude>,
    pub resolved_type: ResolvedType,
}

/// A relation declared through an `includes_one:`/`includes_many:` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewInclude {
    /// Lowercased model name, pluralized for `includes_many`.
    pub key: String,
    /// e.g. `Order`
    pub model: String,
    /// e.g. `OrderResponseModel`
    pub response_model: String,
    pub many: bool,
}
