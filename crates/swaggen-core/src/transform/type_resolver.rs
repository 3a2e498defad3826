use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::ResolveError;
use crate::parse::parameter::Parameter;
use crate::parse::ref_resolve::{lookup_definition, ref_target_name};
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};
use crate::view::{Property, ResolvedType, TypeKind};

use super::enum_registry::EnumCatalog;

/// Converts schema fragments into resolved types.
///
/// References are recorded by name and never expanded, so cyclic definitions
/// resolve without recursion through the cycle. The only lookups into
/// `definitions` are for `allOf` members.
pub struct TypeResolver<'a> {
    definitions: &'a IndexMap<String, SchemaOrRef>,
    enums: &'a mut EnumCatalog,
}

impl<'a> TypeResolver<'a> {
    pub fn new(definitions: &'a IndexMap<String, SchemaOrRef>, enums: &'a mut EnumCatalog) -> Self {
        Self { definitions, enums }
    }

    pub fn resolve(&mut self, fragment: &SchemaOrRef) -> Result<ResolvedType, ResolveError> {
        self.resolve_hinted(fragment, None)
    }

    /// Resolve a parameter: its wrapped `schema` when present, otherwise its
    /// inline type keywords with the parameter name as enum name hint.
    pub fn resolve_parameter(&mut self, param: &Parameter) -> Result<ResolvedType, ResolveError> {
        match &param.schema {
            Some(schema) => self.resolve(schema),
            None => self.resolve_schema(&param.inline, Some(&param.name)),
        }
    }

    /// Resolve a fragment, naming any enum it declares after `hint`.
    pub fn resolve_hinted(
        &mut self,
        fragment: &SchemaOrRef,
        hint: Option<&str>,
    ) -> Result<ResolvedType, ResolveError> {
        match fragment {
            SchemaOrRef::Ref {
                ref_path,
                description,
            } => Ok(ResolvedType::new(
                TypeKind::Reference {
                    target: ref_target_name(ref_path)?.to_string(),
                },
                description.clone(),
            )),
            SchemaOrRef::Schema(schema) => self.resolve_schema(schema, hint),
            SchemaOrRef::Unknown(_) => {
                debug!("unrecognized schema fragment, resolving to any");
                Ok(ResolvedType::any())
            }
        }
    }

    pub fn resolve_schema(
        &mut self,
        schema: &Schema,
        hint: Option<&str>,
    ) -> Result<ResolvedType, ResolveError> {
        let description = schema.description.clone();

        if !schema.enum_values.is_empty() {
            let enum_type = self
                .enums
                .intern(hint, &schema.enum_values, schema.description.as_deref());
            return Ok(ResolvedType::new(TypeKind::Enum(enum_type), description));
        }

        let kind = match &schema.schema_type {
            Some(SchemaType::String) => TypeKind::String,
            Some(SchemaType::Number | SchemaType::Integer) => TypeKind::Number,
            Some(SchemaType::Boolean) => TypeKind::Boolean,
            Some(SchemaType::Array) => {
                let element_type = match &schema.items {
                    Some(items) => self.resolve(items)?,
                    None => ResolvedType::any(),
                };
                TypeKind::Array {
                    element_type: Box::new(element_type),
                }
            }
            Some(SchemaType::Object) | None => self.resolve_object_like(schema)?,
            Some(SchemaType::File) => TypeKind::Any,
            Some(SchemaType::Other(other) | SchemaType::Unrecognized(other)) => {
                debug!("unsupported schema type `{other}`, resolving to any");
                TypeKind::Any
            }
        };

        Ok(ResolvedType::new(kind, description))
    }

    fn resolve_object_like(&mut self, schema: &Schema) -> Result<TypeKind, ResolveError> {
        // Free-form containers declare `minItems` and a `title` without a shape.
        if schema.min_items.is_some() && schema.title.is_some() {
            return Ok(TypeKind::Any);
        }

        let mut properties = Vec::new();

        for member in &schema.all_of {
            let inherited = match member {
                SchemaOrRef::Ref { ref_path, .. } => match lookup_definition(self.definitions, ref_path)? {
                    Some(SchemaOrRef::Schema(target)) => self.declared_properties(target)?,
                    Some(SchemaOrRef::Ref { .. } | SchemaOrRef::Unknown(_)) => {
                        debug!("allOf member {ref_path} declares no properties, skipping");
                        continue;
                    }
                    None => {
                        warn!("allOf member {ref_path} not found in definitions, skipping");
                        continue;
                    }
                },
                SchemaOrRef::Schema(inline) => self.declared_properties(inline)?,
                SchemaOrRef::Unknown(_) => {
                    debug!("unrecognized allOf member, skipping");
                    continue;
                }
            };
            for property in inherited {
                push_property(&mut properties, property);
            }
        }

        for property in self.declared_properties(schema)? {
            push_property(&mut properties, property);
        }

        if !properties.iter().any(|p| p.name == "id") {
            properties.push(synthetic_id());
        }

        Ok(TypeKind::Object { properties })
    }

    /// A schema's own `properties`, without inheritance or a synthetic id.
    fn declared_properties(&mut self, schema: &Schema) -> Result<Vec<Property>, ResolveError> {
        schema
            .properties
            .iter()
            .map(|(name, fragment)| {
                Ok(Property {
                    name: name.clone(),
                    resolved_type: self.resolve(fragment)?,
                    required: schema.required.iter().any(|r| r == name),
                })
            })
            .collect()
    }
}

/// Later declarations of a property replace earlier ones in place.
fn push_property(properties: &mut Vec<Property>, property: Property) {
    match properties.iter_mut().find(|p| p.name == property.name) {
        Some(existing) => *existing = property,
        None => properties.push(property),
    }
}

fn synthetic_id() -> Property {
    Property {
        name: "id".to_string(),
        resolved_type: ResolvedType::new(TypeKind::Number, Some("Unique id".to_string())),
        required: false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema(value: serde_json::Value) -> SchemaOrRef {
        serde_json::from_value(value).unwrap()
    }

    fn definitions(value: serde_json::Value) -> IndexMap<String, SchemaOrRef> {
        serde_json::from_value(value).unwrap()
    }

    fn names(resolved: &ResolvedType) -> Vec<&str> {
        resolved.properties().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_reference_is_not_expanded() {
        let defs = definitions(json!({ "Pet": { "type": "object" } }));
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver.resolve(&schema(json!({ "$ref": "#/definitions/Pet" }))).unwrap();
        assert_eq!(
            resolved.kind,
            TypeKind::Reference {
                target: "Pet".into()
            }
        );
    }

    #[test]
    fn test_reference_carries_sibling_description() {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver
            .resolve(&schema(json!({
                "$ref": "#/definitions/Category",
                "description": "Where the pet is listed"
            })))
            .unwrap();
        assert!(resolved.is_reference());
        assert_eq!(resolved.description.as_deref(), Some("Where the pet is listed"));
    }

    #[test]
    fn test_malformed_reference_fails() {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let err = resolver
            .resolve(&schema(json!({ "$ref": "#/definitions/" })))
            .unwrap_err();
        assert!(matches!(err, ResolveError::MalformedReference(_)));
    }

    fn kind_of(value: serde_json::Value) -> TypeKind {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);
        resolver.resolve(&schema(value)).unwrap().kind
    }

    #[test]
    fn test_primitives() {
        assert_eq!(kind_of(json!({ "type": "string" })), TypeKind::String);
        assert_eq!(kind_of(json!({ "type": "integer" })), TypeKind::Number);
        assert_eq!(kind_of(json!({ "type": "number" })), TypeKind::Number);
        assert_eq!(kind_of(json!({ "type": "boolean" })), TypeKind::Boolean);
        assert_eq!(kind_of(json!({ "type": "file" })), TypeKind::Any);
        assert_eq!(kind_of(json!({ "type": "uuid" })), TypeKind::Any);
    }

    #[test]
    fn test_type_lists() {
        assert_eq!(kind_of(json!({ "type": ["string", "null"] })), TypeKind::String);
        assert_eq!(kind_of(json!({ "type": ["null", "integer"] })), TypeKind::Number);
        assert_eq!(kind_of(json!({ "type": ["string", "integer"] })), TypeKind::Any);
        assert_eq!(kind_of(json!({ "type": 7 })), TypeKind::Any);
    }

    #[test]
    fn test_unrecognized_fragments_degrade_to_any() {
        assert_eq!(kind_of(json!(true)), TypeKind::Any);
        assert_eq!(kind_of(json!("string")), TypeKind::Any);

        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);
        let resolved = resolver
            .resolve(&schema(json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "required": true },
                    "tags": { "type": "array", "minItems": 0.5, "items": { "type": "string" } },
                    "extra": false
                }
            })))
            .unwrap();

        let kinds: Vec<&TypeKind> = resolved
            .properties()
            .iter()
            .map(|p| &p.resolved_type.kind)
            .collect();
        assert_eq!(names(&resolved), ["name", "tags", "extra", "id"]);
        assert_eq!(kinds[0], &TypeKind::String);
        assert!(matches!(kinds[1], TypeKind::Array { .. }));
        assert_eq!(kinds[2], &TypeKind::Any);
    }

    #[test]
    fn test_array_of_refs() {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver
            .resolve(&schema(json!({ "type": "array", "items": { "$ref": "Tag" } })))
            .unwrap();
        let TypeKind::Array { element_type } = resolved.kind else {
            panic!("expected array");
        };
        assert!(element_type.is_reference());
    }

    #[test]
    fn test_free_form_container_is_any() {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver
            .resolve(&schema(json!({ "title": "Bag", "minItems": 0 })))
            .unwrap();
        assert_eq!(resolved.kind, TypeKind::Any);
    }

    #[test]
    fn test_object_gets_synthetic_id() {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver
            .resolve(&schema(json!({
                "type": "object",
                "required": ["name"],
                "properties": { "name": { "type": "string" }, "tag": { "type": "string" } }
            })))
            .unwrap();
        assert_eq!(names(&resolved), ["name", "tag", "id"]);

        let props = resolved.properties();
        assert!(props[0].required);
        assert!(props[1].is_optional());
        assert!(props[2].is_optional());
        assert_eq!(props[2].resolved_type.kind, TypeKind::Number);
    }

    #[test]
    fn test_declared_id_is_kept() {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver
            .resolve(&schema(json!({
                "properties": { "id": { "type": "string" }, "name": { "type": "string" } }
            })))
            .unwrap();
        assert_eq!(names(&resolved), ["id", "name"]);
        assert_eq!(resolved.properties()[0].resolved_type.kind, TypeKind::String);
    }

    #[test]
    fn test_all_of_flattens_one_level() {
        let defs = definitions(json!({
            "Base": {
                "properties": { "id": { "type": "integer" }, "created": { "type": "string" } }
            },
            "Deep": {
                "allOf": [{ "$ref": "#/definitions/Base" }],
                "properties": { "deep": { "type": "boolean" } }
            }
        }));
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver
            .resolve(&schema(json!({
                "allOf": [
                    { "$ref": "#/definitions/Deep" },
                    { "properties": { "extra": { "type": "string" } } }
                ],
                "properties": { "name": { "type": "string" } }
            })))
            .unwrap();
        // `Deep` contributes `deep` only; its own allOf on `Base` is not followed.
        assert_eq!(names(&resolved), ["deep", "extra", "name", "id"]);
    }

    #[test]
    fn test_all_of_missing_member_is_skipped() {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver
            .resolve(&schema(json!({
                "allOf": [{ "$ref": "#/definitions/Missing" }],
                "properties": { "name": { "type": "string" } }
            })))
            .unwrap();
        assert_eq!(names(&resolved), ["name", "id"]);
    }

    #[test]
    fn test_all_of_id_is_not_duplicated() {
        let defs = definitions(json!({
            "Base": { "properties": { "id": { "type": "integer" } } }
        }));
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver
            .resolve(&schema(json!({
                "allOf": [{ "$ref": "#/definitions/Base" }],
                "properties": { "id": { "type": "string" } }
            })))
            .unwrap();
        assert_eq!(names(&resolved), ["id"]);
        assert_eq!(resolved.properties()[0].resolved_type.kind, TypeKind::String);
    }

    #[test]
    fn test_enum_uses_hint() {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        let resolved = resolver
            .resolve_hinted(
                &schema(json!({ "type": "string", "enum": ["available", "sold"] })),
                Some("status"),
            )
            .unwrap();
        let TypeKind::Enum(enum_type) = resolved.kind else {
            panic!("expected enum");
        };
        assert_eq!(enum_type.name, "IStatus");
        assert_eq!(enum_type.values, vec![json!("available"), json!("sold")]);
        assert_eq!(enums.into_definitions().len(), 1);
    }

    #[test]
    fn test_property_enum_without_hint() {
        let defs = IndexMap::new();
        let mut enums = EnumCatalog::new();
        let mut resolver = TypeResolver::new(&defs, &mut enums);

        resolver
            .resolve(&schema(json!({
                "properties": { "kind": { "type": "string", "enum": ["a", "b"] } }
            })))
            .unwrap();
        let defs = enums.into_definitions();
        assert_eq!(defs[0].name, "IEnum0");
    }
}
