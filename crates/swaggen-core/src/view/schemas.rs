use serde::Serialize;

/// A resolved schema fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub kind: TypeKind,
}

/// The shape of a resolved type. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum TypeKind {
    /// A named definition, never expanded inline.
    #[serde(rename = "reference")]
    Reference { target: String },
    #[serde(rename = "primitive-string")]
    String,
    /// Both `number` and `integer`.
    #[serde(rename = "primitive-number")]
    Number,
    #[serde(rename = "primitive-boolean")]
    Boolean,
    #[serde(rename = "array")]
    Array {
        #[serde(rename = "elementType")]
        element_type: Box<ResolvedType>,
    },
    #[serde(rename = "object")]
    Object { properties: Vec<Property> },
    #[serde(rename = "enum")]
    Enum(EnumType),
    #[serde(rename = "any")]
    Any,
}

/// An inline enumeration and the name allocated for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<serde_json::Value>,
}

/// A property of an object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "resolvedType")]
    pub resolved_type: ResolvedType,
    pub required: bool,
}

impl Property {
    pub fn is_optional(&self) -> bool {
        !self.required
    }
}

impl ResolvedType {
    pub fn new(kind: TypeKind, description: Option<String>) -> Self {
        Self { description, kind }
    }

    pub fn any() -> Self {
        Self::new(TypeKind::Any, None)
    }

    /// The kind tag as the template contract spells it.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TypeKind::Reference { .. } => "reference",
            TypeKind::String => "primitive-string",
            TypeKind::Number => "primitive-number",
            TypeKind::Boolean => "primitive-boolean",
            TypeKind::Array { .. } => "array",
            TypeKind::Object { .. } => "object",
            TypeKind::Enum(_) => "enum",
            TypeKind::Any => "any",
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, TypeKind::Reference { .. })
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, TypeKind::Object { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    /// Primitives, enums and `any` render without nesting.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::String | TypeKind::Number | TypeKind::Boolean | TypeKind::Enum(_) | TypeKind::Any
        )
    }

    /// Properties of an object type; empty for every other kind.
    pub fn properties(&self) -> &[Property] {
        match &self.kind {
            TypeKind::Object { properties } => properties,
            _ => &[],
        }
    }
}
