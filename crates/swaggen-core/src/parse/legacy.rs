//! Swagger 1.x API declarations: a flat `apis[].operations[]` structure.

use serde::{Deserialize, Serialize};

use super::schema::{Schema, SchemaOrRef, SchemaType};
use super::spec::VersionString;

/// Resource-listing style info block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacyInfo {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Top-level Swagger 1.x document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacySpec {
    #[serde(rename = "swaggerVersion", skip_serializing_if = "Option::is_none")]
    pub swagger_version: Option<VersionString>,

    #[serde(rename = "apiVersion", skip_serializing_if = "Option::is_none")]
    pub api_version: Option<VersionString>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(rename = "resourcePath", skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<LegacyInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apis: Vec<LegacyApi>,
}

/// One path entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyApi {
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<LegacyOperation>,
}

/// An operation on a legacy path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyOperation {
    pub method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<LegacyParameter>,
}

/// Legacy parameter location (`paramType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyParamType {
    Path,
    Query,
    Body,
    Header,
    Form,
    /// Any other `paramType`; such parameters are skipped.
    #[serde(other)]
    Unknown,
}

/// A legacy parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyParameter {
    pub name: String,

    #[serde(rename = "paramType")]
    pub param_type: LegacyParamType,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<SchemaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(rename = "x-name-pattern", skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
}

impl LegacyParameter {
    /// The parameter's type as a schema fragment. A `type` outside the primitive
    /// set names a model and becomes a reference to it.
    pub fn to_schema(&self) -> SchemaOrRef {
        if let Some(SchemaType::Other(model)) = &self.data_type {
            return SchemaOrRef::reference(model.clone());
        }
        SchemaOrRef::Schema(Box::new(Schema {
            schema_type: self.data_type.clone(),
            description: self.description.clone(),
            items: self.items.clone(),
            enum_values: self.enum_values.clone(),
            ..Schema::default()
        }))
    }
}
