use indexmap::IndexMap;

use super::parameter::Parameter;
use super::schema::SchemaOrRef;
use super::spec::Swagger2Spec;
use crate::error::ResolveError;

/// Extract the definition name from a `$ref`: its final path segment, so
/// `#/definitions/Pet` and a bare `Pet` both name `Pet`.
pub fn ref_target_name(ref_path: &str) -> Result<&str, ResolveError> {
    match ref_path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ResolveError::MalformedReference(ref_path.to_string())),
    }
}

/// Look up a `$ref` parameter in the document's shared `parameters` registry.
pub fn lookup_parameter<'a>(
    spec: &'a Swagger2Spec,
    ref_path: &str,
) -> Result<&'a Parameter, ResolveError> {
    let name = ref_target_name(ref_path)?;
    spec.parameters
        .get(name)
        .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
}

/// Look up a `$ref` schema among the document's definitions. A missing target is
/// not an error here; callers decide how to degrade.
pub fn lookup_definition<'a>(
    definitions: &'a IndexMap<String, SchemaOrRef>,
    ref_path: &str,
) -> Result<Option<&'a SchemaOrRef>, ResolveError> {
    let name = ref_target_name(ref_path)?;
    Ok(definitions.get(name))
}
