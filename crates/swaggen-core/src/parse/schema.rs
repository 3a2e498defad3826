use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A Swagger `type` keyword value. A name outside the known set is kept verbatim,
/// which legacy documents use to name a model. A value that is not a single name
/// is kept as its JSON text in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    File,
    Other(String),
    Unrecognized(String),
}

impl From<String> for SchemaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "string" => SchemaType::String,
            "number" => SchemaType::Number,
            "integer" => SchemaType::Integer,
            "boolean" => SchemaType::Boolean,
            "array" => SchemaType::Array,
            "object" => SchemaType::Object,
            "file" => SchemaType::File,
            _ => SchemaType::Other(value),
        }
    }
}

/// A type list with a single non-null member (`[string, "null"]`) reads as that
/// member.
impl From<serde_json::Value> for SchemaType {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(name) => SchemaType::from(name),
            serde_json::Value::Array(members) => {
                let mut named = members
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .filter(|m| *m != "null");
                match (named.next(), named.next()) {
                    (Some(only), None) => SchemaType::from(only.to_string()),
                    _ => SchemaType::Unrecognized(serde_json::Value::Array(members).to_string()),
                }
            }
            other => SchemaType::Unrecognized(other.to_string()),
        }
    }
}

impl From<SchemaType> for String {
    fn from(value: SchemaType) -> Self {
        match value {
            SchemaType::String => "string".to_string(),
            SchemaType::Number => "number".to_string(),
            SchemaType::Integer => "integer".to_string(),
            SchemaType::Boolean => "boolean".to_string(),
            SchemaType::Array => "array".to_string(),
            SchemaType::Object => "object".to_string(),
            SchemaType::File => "file".to_string(),
            SchemaType::Other(other) | SchemaType::Unrecognized(other) => other,
        }
    }
}

/// A reference, an inline schema, or anything else found where a schema belongs.
/// `Unknown` keeps such fragments so they resolve to `any` instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Schema(Box<Schema>),
    Unknown(serde_yaml_ng::Value),
}

impl SchemaOrRef {
    /// A reference with no sibling keywords.
    pub fn reference(ref_path: impl Into<String>) -> Self {
        SchemaOrRef::Ref {
            ref_path: ref_path.into(),
            description: None,
        }
    }
}

/// A Swagger 2.0 schema object, limited to the keywords resolution reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Object properties
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    /// Only the list form counts; a draft-3 style `required: true` is ignored.
    #[serde(
        deserialize_with = "required_names",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub required: Vec<String>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    // Composition
    #[serde(rename = "allOf", skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaOrRef>,

    // Enum values
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<serde_json::Number>,
}

fn required_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(names) => names
            .into_iter()
            .filter_map(|name| match name {
                serde_json::Value::String(name) => Some(name),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// `additionalProperties` can be a boolean, a schema, or a list of relation
/// directives such as `includes_many:OrderResponseModel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Directives(Vec<String>),
    Schema(Box<SchemaOrRef>),
}
