use swaggen_core::view::{ResolvedType, TypeKind};

/// Map a `ResolvedType` to its TypeScript type string representation.
///
/// References and enums are emitted by name; the template declares them.
pub fn resolved_type_to_ts(ty: &ResolvedType) -> String {
    match &ty.kind {
        TypeKind::Reference { target } => target.clone(),
        TypeKind::String => "string".to_string(),
        TypeKind::Number => "number".to_string(),
        TypeKind::Boolean => "boolean".to_string(),
        TypeKind::Enum(e) => e.name.clone(),
        TypeKind::Any => "unknown".to_string(),
        TypeKind::Array { element_type } => {
            let inner_ts = resolved_type_to_ts(element_type);
            if inner_ts.contains('|') {
                format!("({inner_ts})[]")
            } else {
                format!("{inner_ts}[]")
            }
        }
        TypeKind::Object { properties } => {
            if properties.is_empty() {
                return "Record<string, unknown>".to_string();
            }
            let fields: Vec<String> = properties
                .iter()
                .map(|p| {
                    format!(
                        "{}{}: {}",
                        property_key(&p.name),
                        cardinality(p.required),
                        resolved_type_to_ts(&p.resolved_type)
                    )
                })
                .collect();
            format!("{{ {} }}", fields.join("; "))
        }
    }
}

/// Literal union of enum values, e.g. `"asc" | "desc"`.
pub fn enum_literal_union(values: &[serde_json::Value]) -> String {
    if values.is_empty() {
        return "never".to_string();
    }
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Object key for a property, quoted unless it is a plain identifier.
pub fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        name.to_string()
    } else {
        serde_json::Value::from(name).to_string()
    }
}

/// `?` for optional members, empty otherwise.
pub fn cardinality(required: bool) -> &'static str {
    if required { "" } else { "?" }
}
