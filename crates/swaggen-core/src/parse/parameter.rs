use serde::{Deserialize, Serialize};

use super::schema::{Schema, SchemaOrRef};

/// Parameter location (`in`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    FormData,
    Body,
}

/// A Swagger 2.0 parameter. Non-body parameters describe their type inline, so the
/// type keywords are flattened into `inline`; body parameters carry `schema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(
        rename = "x-exclude-from-bindings",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub exclude_from_bindings: bool,

    #[serde(rename = "x-proxy-header", skip_serializing_if = "Option::is_none")]
    pub proxy_header: Option<serde_json::Value>,

    #[serde(rename = "x-name-pattern", skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,

    #[serde(flatten)]
    pub inline: Schema,
}

impl Parameter {
    /// Build the synthetic body parameter standing for one property of an
    /// object-shaped body schema.
    pub fn body_property(name: &str, property: &SchemaOrRef, required: bool) -> Self {
        let (schema, inline) = match property {
            SchemaOrRef::Ref { .. } | SchemaOrRef::Unknown(_) => {
                (Some(property.clone()), Schema::default())
            }
            SchemaOrRef::Schema(s) => (None, s.as_ref().clone()),
        };
        Self {
            name: name.to_string(),
            location: ParameterLocation::Body,
            required,
            schema,
            exclude_from_bindings: false,
            proxy_header: None,
            name_pattern: None,
            inline,
        }
    }

    /// Whether the parameter is a header injected by a proxy or app server.
    pub fn is_proxy_header(&self) -> bool {
        match &self.proxy_header {
            None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => false,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Box<Parameter>),
}
