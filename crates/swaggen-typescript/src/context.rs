//! Template context built from a view model.
//!
//! The view model stores a single tagged `TypeKind` per type and a single
//! `ViewLocation` per parameter. The boolean flags templates test against
//! (`isRef`, `isBodyParameter`, `isGET`, ...) are derived here and nowhere else.

use std::collections::BTreeSet;

use minijinja::{Value, context};
use swaggen_core::view::{
    EnumDefinition, HttpMethod, Property, ResolvedType, TypeKind, ViewDefinition, ViewLocation,
    ViewMethod, ViewModel, ViewParameter,
};

use crate::type_mapper::{cardinality, enum_literal_union, property_key, resolved_type_to_ts};

/// Placeholder substituted with each map key of an `x-name-pattern` parameter.
const NAME_PLACEHOLDER: &str = "{name}";

/// Build the root context handed to the class template.
pub fn view_context(view: &ViewModel) -> Value {
    let enumerations: Vec<Value> = view.enumerations.iter().map(enum_context).collect();
    let definitions: Vec<Value> = view.definitions.iter().map(definition_context).collect();
    let methods: Vec<Value> = view.methods.iter().map(method_context).collect();

    context! {
        title => view.title.clone(),
        description => view.description.clone(),
        version => view.version.clone(),
        domain => view.domain.clone(),
        className => view.class_name.clone(),
        moduleName => view.module_name.clone(),
        isNode => view.is_node,
        isES6 => view.is_es6,
        imports => view.imports.clone(),
        isSecure => view.security.secure,
        isSecureToken => view.security.bearer_token,
        isSecureApiKey => view.security.api_key,
        isSecureBasic => view.security.basic_auth,
        enumerations => enumerations,
        definitions => definitions,
        opaqueReferences => opaque_references(view),
        methods => methods,
    }
}

/// Context of one resolved type, recursing into elements and properties.
pub fn type_context(ty: &ResolvedType) -> Value {
    let target = match &ty.kind {
        TypeKind::Reference { target } => Some(target.clone()),
        TypeKind::Enum(e) => Some(e.name.clone()),
        _ => None,
    };
    let element_type = match &ty.kind {
        TypeKind::Array { element_type } => Some(type_context(element_type)),
        _ => None,
    };
    let properties: Vec<Value> = ty.properties().iter().map(property_context).collect();

    context! {
        kind => ty.kind_name(),
        description => ty.description.clone(),
        isRef => ty.is_reference(),
        isObject => ty.is_object(),
        isArray => ty.is_array(),
        isAtomic => ty.is_atomic(),
        isEnum => ty.is_enum(),
        tsType => resolved_type_to_ts(ty),
        target => target,
        elementType => element_type,
        properties => properties,
    }
}

fn property_context(property: &Property) -> Value {
    context! {
        name => property.name.clone(),
        key => property_key(&property.name),
        required => property.required,
        cardinality => cardinality(property.required),
        description => property.resolved_type.description.clone(),
        tsType => resolved_type_to_ts(&property.resolved_type),
        resolvedType => type_context(&property.resolved_type),
    }
}

fn enum_context(definition: &EnumDefinition) -> Value {
    context! {
        name => definition.name.clone(),
        values => definition.values.clone(),
        description => definition.description.clone(),
        tsType => enum_literal_union(&definition.values),
    }
}

fn definition_context(definition: &ViewDefinition) -> Value {
    let relations: Vec<Value> = definition
        .includes
        .iter()
        .map(|include| {
            let ts_type = if include.many {
                format!("{}[]", include.response_model)
            } else {
                include.response_model.clone()
            };
            context! {
                key => include.key.clone(),
                model => include.model.clone(),
                responseModel => include.response_model.clone(),
                many => include.many,
                tsType => ts_type,
            }
        })
        .collect();

    context! {
        name => definition.name.clone(),
        modelPlainName => definition.model_plain_name.clone(),
        modelRawName => definition.model_raw_name.clone(),
        description => definition.description.clone(),
        isModel => true,
        isResponse => definition.is_response,
        isRequest => definition.is_request,
        hasIncluded => !definition.includes.is_empty(),
        includedRelations => relations,
        resolvedType => type_context(&definition.resolved_type),
    }
}

fn parameter_context(param: &ViewParameter) -> Value {
    let pattern_map = param
        .pattern
        .as_deref()
        .is_some_and(|p| p.contains(NAME_PLACEHOLDER));
    let ts_type = if pattern_map {
        format!("Record<string, {}>", resolved_type_to_ts(&param.resolved_type))
    } else {
        resolved_type_to_ts(&param.resolved_type)
    };
    // A pattern without a placeholder simply renames the query key.
    let query_key = match &param.pattern {
        Some(pattern) if !pattern_map => pattern.clone(),
        _ => param.name.clone(),
    };

    context! {
        name => param.name.clone(),
        camelCaseName => param.camel_case_name.clone(),
        key => property_key(&param.camel_case_name),
        description => param.description.clone(),
        required => param.required,
        cardinality => cardinality(param.required),
        location => location_name(param.location),
        isPathParameter => param.location == ViewLocation::Path,
        isQueryParameter => param.location == ViewLocation::Query,
        isHeaderParameter => param.location == ViewLocation::Header,
        isBodyParameter => param.location == ViewLocation::Body,
        isFormParameter => param.location == ViewLocation::Form,
        bodyProperty => param.body_property,
        isSingleton => param.is_singleton_enum(),
        singleton => param.singleton.clone(),
        isPatternType => param.pattern.is_some(),
        isPatternMap => pattern_map,
        pattern => param.pattern.clone(),
        queryKey => query_key,
        tsType => ts_type,
        resolvedType => type_context(&param.resolved_type),
    }
}

fn method_context(method: &ViewMethod) -> Value {
    let arguments: Vec<&ViewParameter> = method
        .parameters
        .iter()
        .filter(|p| !p.is_singleton_enum())
        .collect();
    let located = |location: ViewLocation| -> Vec<Value> {
        method
            .parameters
            .iter()
            .filter(|p| p.location == location)
            .map(parameter_context)
            .collect()
    };
    let body_properties: Vec<Value> = method
        .parameters
        .iter()
        .filter(|p| p.location == ViewLocation::Body && p.body_property)
        .map(parameter_context)
        .collect();
    let opaque_body = method
        .parameters
        .iter()
        .find(|p| p.location == ViewLocation::Body && !p.body_property)
        .map(parameter_context);
    let headers: Vec<Value> = method
        .headers
        .iter()
        .map(|h| context! { name => h.name.clone(), value => h.value.clone() })
        .collect();
    let parameters: Vec<Value> = method.parameters.iter().map(parameter_context).collect();
    let response = method.response_model.as_ref();

    context! {
        methodName => method.name.clone(),
        method => method.method.as_str(),
        path => method.path.clone(),
        pathTemplate => path_template(method),
        summary => method.summary.clone(),
        externalDocs => method.external_docs.clone(),
        isGET => method.method == HttpMethod::Get,
        isPOST => method.method == HttpMethod::Post,
        isSecure => method.security.secure,
        isSecureToken => method.security.bearer_token,
        isSecureApiKey => method.security.api_key,
        isSecureBasic => method.security.basic_auth,
        mustFormPost => method.form_encoded,
        isModelDriven => response.is_some(),
        responseTypeName => response.map(|r| r.name.clone()),
        modelRawName => response.map(|r| r.raw_name.clone()),
        returnType => response.map_or_else(|| "unknown".to_string(), |r| r.name.clone()),
        headers => headers,
        parameters => parameters,
        hasArguments => !arguments.is_empty(),
        hasRequiredArguments => arguments.iter().any(|p| p.required),
        argumentSignature => argument_signature(&arguments),
        pathParameters => located(ViewLocation::Path),
        queryParameters => located(ViewLocation::Query),
        headerParameters => located(ViewLocation::Header),
        formParameters => located(ViewLocation::Form),
        bodyProperties => body_properties,
        opaqueBody => opaque_body,
    }
}

fn location_name(location: ViewLocation) -> &'static str {
    match location {
        ViewLocation::Path => "path",
        ViewLocation::Query => "query",
        ViewLocation::Header => "header",
        ViewLocation::Body => "body",
        ViewLocation::Form => "formData",
    }
}

/// Type literal of the `parameters` argument, e.g. `{ petId: number; status?: IStatus }`.
fn argument_signature(arguments: &[&ViewParameter]) -> String {
    let fields: Vec<String> = arguments
        .iter()
        .map(|p| {
            let pattern_map = p
                .pattern
                .as_deref()
                .is_some_and(|pattern| pattern.contains(NAME_PLACEHOLDER));
            let ts_type = resolved_type_to_ts(&p.resolved_type);
            let ts_type = if pattern_map {
                format!("Record<string, {ts_type}>")
            } else {
                ts_type
            };
            format!(
                "{}{}: {}",
                property_key(&p.camel_case_name),
                cardinality(p.required),
                ts_type
            )
        })
        .collect();
    format!("{{ {} }}", fields.join("; "))
}

/// Body of a template literal producing the request path, with each
/// `{variable}` bound to its path parameter.
fn path_template(method: &ViewMethod) -> String {
    let mut out = String::new();
    let mut rest = method.path.as_str();

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&escape_template_literal(&rest[..start]));
        let variable = &rest[start + 1..start + len];
        let param = method
            .parameters
            .iter()
            .find(|p| p.location == ViewLocation::Path && p.name == variable);
        match param {
            Some(p) => match &p.singleton {
                Some(serde_json::Value::String(s)) => out.push_str(&escape_template_literal(s)),
                Some(other) => out.push_str(&other.to_string()),
                None => out.push_str(&format!(
                    "${{encodeURIComponent(String(parameters.{}))}}",
                    p.camel_case_name
                )),
            },
            None => out.push_str(&escape_template_literal(&rest[start..=start + len])),
        }
        rest = &rest[start + len + 1..];
    }
    out.push_str(&escape_template_literal(rest));
    out
}

fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Reference targets that no emitted interface declares. The template
/// declares them as opaque aliases so the output type-checks on its own.
fn opaque_references(view: &ViewModel) -> Vec<String> {
    let mut targets = BTreeSet::new();
    for method in &view.methods {
        for param in &method.parameters {
            collect_references(&param.resolved_type, &mut targets);
        }
        if let Some(response) = &method.response_model {
            targets.insert(response.name.clone());
        }
    }
    for definition in &view.definitions {
        collect_references(&definition.resolved_type, &mut targets);
        for include in &definition.includes {
            targets.insert(include.response_model.clone());
        }
    }
    for definition in &view.definitions {
        targets.remove(&definition.name);
    }
    targets.into_iter().collect()
}

fn collect_references(ty: &ResolvedType, targets: &mut BTreeSet<String>) {
    match &ty.kind {
        TypeKind::Reference { target } => {
            targets.insert(target.clone());
        }
        TypeKind::Array { element_type } => collect_references(element_type, targets),
        TypeKind::Object { properties } => {
            for property in properties {
                collect_references(&property.resolved_type, targets);
            }
        }
        _ => {}
    }
}
